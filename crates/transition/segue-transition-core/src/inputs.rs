//! Input contracts for the core engine.
//!
//! Every asynchronous host signal -- a DOM event, a settled promise, a wheel
//! delta, a route-change notification -- becomes an entry here and is applied
//! at the top of `Engine::update`. Two entries arriving in the same tick may
//! be ordered arbitrarily by the host; the contracts below stay correct under
//! any ordering (signal assertions are commutative and idempotent, triggers
//! are single-flight).

use serde::{Deserialize, Serialize};

use crate::ids::SignalId;
use segue_host_core::Point;

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// Readiness signals observed satisfied since the last tick.
    #[serde(default)]
    pub signals: Vec<SignalId>,
    /// User or host triggers applied before stepping.
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Inputs {
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty() && self.commands.is_empty()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Theme-toggle trigger, anchored at the pointer location (or viewport
    /// center for keyboard activation).
    ToggleMode { origin: Point },
    /// Link click routed through the coordinator.
    Navigate { url: String },
    /// Host confirmation that the route observably changed.
    RouteChanged { path: String },
    /// Raw wheel/touch scroll input.
    ScrollDelta { delta: f32 },
    /// Detach the scroll bridge alone (scroll-linked section unmounted).
    DetachScroll,
    /// Full orchestrator teardown; cancels every pending run and releases all
    /// document resources.
    Teardown,
}
