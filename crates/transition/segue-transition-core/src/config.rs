//! Core configuration for segue-transition-core.
//!
//! All durations are in milliseconds of engine clock (the clock the host
//! advances through `Engine::update`), not wall time.

use serde::{Deserialize, Serialize};

/// A progress floor asserted automatically once the engine clock passes
/// `at_ms`. These keep the loader visibly moving before any real readiness
/// signal lands.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TimedFloor {
    pub at_ms: f32,
    pub floor: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    // -- ReadinessProgressController --------------------------------------
    /// Fixed cadence at which `current` chases `target`.
    pub convergence_interval_ms: f32,
    /// Fraction of the remaining gap closed per convergence step.
    pub smoothing: f32,
    /// Residual gap below which `current` snaps to `target`.
    pub snap_epsilon: f32,
    /// `current` must be at least this before the exit may fire.
    pub complete_threshold: f32,
    /// Minimum display duration (Tmin).
    pub min_display_ms: f32,
    /// Maximum display duration (Tmax); the liveness deadline.
    pub max_display_ms: f32,
    /// Elapsed-time floors asserted without any host signal.
    pub timed_floors: Vec<TimedFloor>,
    /// Exit sequence: content fade, then reveal-shape expansion.
    pub exit_fade_ms: f32,
    pub exit_expand_ms: f32,

    // -- RevealTransition --------------------------------------------------
    pub reveal_expand_ms: f32,
    pub reveal_fade_ms: f32,
    /// Scale-up applied to the cover radius so the shape overshoots the
    /// farthest corner.
    pub reveal_margin: f32,

    // -- NavigationCoordinator ----------------------------------------------
    /// Fallback deadline for a navigation whose confirmation never fires.
    pub nav_deadline_ms: f32,

    // -- ScrollBridge --------------------------------------------------------
    /// Easing rate per millisecond; the virtual position closes
    /// `1 - exp(-ease_rate * dt)` of the gap each tick.
    pub scroll_ease_rate: f32,
    /// Gap below which the virtual position snaps to the physical one.
    pub scroll_snap_epsilon: f32,

    /// Maximum events retained per tick before the overflow is dropped.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            convergence_interval_ms: 30.0,
            smoothing: 0.18,
            snap_epsilon: 1.0,
            complete_threshold: 95.0,
            min_display_ms: 800.0,
            max_display_ms: 3000.0,
            timed_floors: vec![
                TimedFloor {
                    at_ms: 100.0,
                    floor: 20.0,
                },
                TimedFloor {
                    at_ms: 300.0,
                    floor: 50.0,
                },
                TimedFloor {
                    at_ms: 600.0,
                    floor: 80.0,
                },
            ],
            exit_fade_ms: 300.0,
            exit_expand_ms: 600.0,
            reveal_expand_ms: 500.0,
            reveal_fade_ms: 400.0,
            reveal_margin: 1.1,
            nav_deadline_ms: 500.0,
            scroll_ease_rate: 0.008,
            scroll_snap_epsilon: 0.1,
            max_events_per_tick: 256,
        }
    }
}
