//! Output contracts from the core engine.
//!
//! Outputs carry the numeric changes for this tick, keyed by stable string
//! handles, and a separate list of semantic events. Adapters apply changes to
//! the host (style properties, scroll triggers) and transport events.

use serde::{Deserialize, Serialize};

/// Stable change keys published by the core.
pub mod keys {
    pub const LOADER_PROGRESS: &str = "loader/progress";
    pub const LOADER_CONTENT_OPACITY: &str = "loader/content-opacity";
    pub const LOADER_SHAPE_SCALE: &str = "loader/shape-scale";
    pub const LOADER_HIDDEN: &str = "loader/hidden";
    pub const REVEAL_RADIUS: &str = "reveal/radius";
    pub const REVEAL_SCALE: &str = "reveal/scale";
    pub const REVEAL_OPACITY: &str = "reveal/opacity";
    pub const REVEAL_ACTIVE: &str = "reveal/active";
    pub const SCROLL_VIRTUAL: &str = "scroll/virtual";
    pub const SCROLL_VELOCITY: &str = "scroll/velocity";
}

/// The binary display mode masked by the reveal transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub fn flipped(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Mode::Light),
            "dark" => Some(Mode::Dark),
            _ => None,
        }
    }
}

/// One changed target value this tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub key: String,
    pub value: f32,
}

/// How a pending navigation resolved.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ResolvedVia {
    /// The route observably changed.
    RouteChanged,
    /// The fallback deadline elapsed first.
    Deadline,
    /// A newer navigation replaced this one before either path fired.
    Superseded,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// The loader's completion criteria were met and the exit sequence began.
    ExitStarted,
    /// The single authoritative end-of-loading event.
    LoadingComplete,
    /// The display mode flipped (at the reveal's full-coverage keyframe, or
    /// immediately under reduced motion).
    ModeApplied { mode: Mode },
    NavigationStarted { url: String },
    NavigationResolved { url: String, via: ResolvedVia },
    /// The smoothing subsystem failed to initialize; native scrolling stays.
    ScrollDegraded,
    /// Non-fatal host failure absorbed by the core.
    Error { message: String },
    /// Catch-all for forward-compatible payloads.
    Custom {
        kind: String,
        data: serde_json::Value,
    },
}

/// Outputs returned by `Engine::update`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, key: &str, value: f32) {
        self.changes.push(Change {
            key: key.to_string(),
            value,
        });
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }
}
