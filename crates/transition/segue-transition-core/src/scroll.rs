//! ScrollBridge: virtual, eased scroll position republished every tick.
//!
//! Raw wheel/touch deltas move the physical position immediately; the virtual
//! position the rest of the page observes lags behind it under an exponential
//! ease parameterized by elapsed time, so the curve is identical at 30 and
//! 144 frames per second. If the smoothing subsystem fails to initialize the
//! bridge degrades to native scrolling once, at attach, and does no per-tick
//! work afterwards.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::outputs::{keys, CoreEvent, Outputs};

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct VirtualScrollState {
    pub physical: f32,
    pub virtual_pos: f32,
    /// Units per second, derived from the last tick's advance.
    pub velocity: f32,
}

#[derive(Debug, Default)]
pub struct ScrollBridge {
    state: VirtualScrollState,
    attached: bool,
    degraded: bool,
}

impl ScrollBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// `init_ok` reports whether the host's smoothing subsystem loaded. A
    /// failure is detected here once, never retried per-frame.
    pub fn attach(&mut self, init_ok: bool, outputs: &mut Outputs) {
        if !init_ok {
            warn!("scroll smoothing unavailable, keeping native scroll");
            self.degraded = true;
            outputs.push_event(CoreEvent::ScrollDegraded);
            return;
        }
        self.attached = true;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn state(&self) -> &VirtualScrollState {
        &self.state
    }

    /// Accumulate raw input. Ignored when detached or degraded (native
    /// physics owns the position then).
    pub fn on_delta(&mut self, delta: f32) {
        if !self.attached || self.degraded {
            return;
        }
        self.state.physical = (self.state.physical + delta).max(0.0);
    }

    /// Advance the virtual position by `dt` milliseconds and republish it.
    pub fn update(&mut self, dt: f32, cfg: &Config, outputs: &mut Outputs) {
        if !self.attached || self.degraded || dt <= 0.0 {
            return;
        }
        let gap = self.state.physical - self.state.virtual_pos;
        if gap.abs() <= cfg.scroll_snap_epsilon {
            if gap != 0.0 {
                self.state.virtual_pos = self.state.physical;
                outputs.push_change(keys::SCROLL_VIRTUAL, self.state.virtual_pos);
            }
            if self.state.velocity != 0.0 {
                self.state.velocity = 0.0;
                outputs.push_change(keys::SCROLL_VELOCITY, 0.0);
            }
            return;
        }
        let step = gap * (1.0 - (-cfg.scroll_ease_rate * dt).exp());
        self.state.virtual_pos += step;
        self.state.velocity = step / dt * 1000.0;
        outputs.push_change(keys::SCROLL_VIRTUAL, self.state.virtual_pos);
        outputs.push_change(keys::SCROLL_VELOCITY, self.state.velocity);
    }

    /// Deregister: stop publishing and hand scrolling back to the host. The
    /// per-tick callback must not outlive the bridge.
    pub fn detach(&mut self) {
        self.attached = false;
        self.state = VirtualScrollState::default();
    }
}
