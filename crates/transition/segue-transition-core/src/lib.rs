//! Segue Transition Core (engine-agnostic)
//!
//! Coordinates when a visual transition may start, how long it may run, and
//! how it hands control back to the host. Four controllers share one design
//! pattern -- readiness-gated, time-bounded, single-flight transitions --
//! behind a single deterministic [`Engine`] stepped by the host each frame.
//! The host applies the numeric [`Change`]s and transports the [`CoreEvent`]s;
//! the core never schedules its own timers.

pub mod config;
pub mod engine;
pub mod ids;
pub mod inputs;
pub mod navigation;
pub mod outputs;
pub mod progress;
pub mod reveal;
pub mod scroll;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use engine::Engine;
pub use ids::{IdAllocator, RunId, SignalId};
pub use inputs::{Command, Inputs};
pub use navigation::{NavigationCoordinator, PendingNavigation};
pub use outputs::{keys, Change, CoreEvent, Mode, Outputs, ResolvedVia};
pub use progress::{ProgressPhase, ProgressState, ReadinessProgressController};
pub use reveal::{RevealTransition, RunStatus, TransitionRun};
pub use scroll::{ScrollBridge, VirtualScrollState};
pub use segue_host_core::{HostContext, Point, Viewport};
