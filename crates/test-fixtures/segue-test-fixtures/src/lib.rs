//! Fake host implementations shared by segue test suites.

use hashbrown::HashMap;

use segue_host_core::{
    HostContext, Router, RouterError, StateStore, StoreError, Viewport,
};

/// In-memory `StateStore`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read, bypassing the trait, for assertions.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    /// Direct write for test setup.
    pub fn set_raw(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store whose writes always fail, for persistence-degradation tests.
#[derive(Debug, Default)]
pub struct FailingStore;

impl StateStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("failing store".into()))
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::WriteRejected {
            key: key.to_string(),
            reason: "failing store".into(),
        })
    }
}

/// Scripted `Router`: records pushes; the test decides when the "route
/// changed" confirmation is delivered (or never delivers it).
#[derive(Debug)]
pub struct ScriptedRouter {
    pub path: String,
    pub pushes: Vec<String>,
    pub view_transitions: bool,
}

impl ScriptedRouter {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            pushes: Vec::new(),
            view_transitions: true,
        }
    }

    pub fn without_view_transitions(path: &str) -> Self {
        Self {
            view_transitions: false,
            ..Self::new(path)
        }
    }
}

impl Router for ScriptedRouter {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn push(&mut self, url: &str) -> Result<(), RouterError> {
        self.pushes.push(url.to_string());
        Ok(())
    }

    fn supports_view_transitions(&self) -> bool {
        self.view_transitions
    }
}

/// Standard test viewport.
pub fn test_viewport() -> Viewport {
    Viewport::new(1280.0, 800.0)
}

/// Build a `HostContext` over a store and router.
pub fn host<'a>(
    store: &'a mut dyn StateStore,
    router: &'a mut dyn Router,
    reduced_motion: bool,
) -> HostContext<'a> {
    HostContext {
        store,
        router,
        reduced_motion,
        viewport: test_viewport(),
    }
}
