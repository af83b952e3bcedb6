//! Explicit handles for document-level shared state.
//!
//! Each slice of document state the core may hold (scroll lock, overlay
//! element, mode class) is represented by one [`ResourceHandle`]. Acquiring it
//! yields a [`ResourceGuard`] that releases on drop, so every exit path --
//! normal completion, the reduced-motion shortcut, teardown mid-run -- gives
//! the resource back without a dedicated release call.

use std::cell::Cell;
use std::rc::Rc;

/// One acquirable slice of document state. At most one guard is live per
/// handle at any time.
#[derive(Debug, Default, Clone)]
pub struct ResourceHandle {
    held: Rc<Cell<bool>>,
}

impl ResourceHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take exclusive ownership of the resource. Returns `None` if a guard is
    /// already outstanding.
    pub fn acquire(&self) -> Option<ResourceGuard> {
        if self.held.get() {
            return None;
        }
        self.held.set(true);
        Some(ResourceGuard {
            held: Rc::clone(&self.held),
        })
    }

    pub fn is_held(&self) -> bool {
        self.held.get()
    }
}

/// Scoped ownership of a [`ResourceHandle`]; dropping it releases the handle.
#[derive(Debug)]
pub struct ResourceGuard {
    held: Rc<Cell<bool>>,
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        self.held.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_is_exclusive_and_released_on_drop() {
        let handle = ResourceHandle::new();
        assert!(!handle.is_held());

        let guard = handle.acquire().unwrap();
        assert!(handle.is_held());
        assert!(handle.acquire().is_none());

        drop(guard);
        assert!(!handle.is_held());
        assert!(handle.acquire().is_some());
    }
}
