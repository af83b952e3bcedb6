//! RevealTransition: origin-anchored shape expansion masking a binary mode
//! flip.
//!
//! The observable state changes at exactly one point -- the frame the shape
//! reaches full coverage -- so no frame ever renders a half-applied mode. The
//! new mode is persisted at that same point, before the fade starts, so a
//! reload during the fade observes the new value.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use segue_host_core::{cover_radius, HostContext, Point};

use crate::config::Config;
use crate::ids::{IdAllocator, RunId};
use crate::outputs::{keys, CoreEvent, Mode, Outputs};

/// Store key for the persisted mode flag.
pub const MODE_STORE_KEY: &str = "segue/mode";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RunStatus {
    Idle,
    Running,
    Settling,
    Done,
}

/// One execution of the reveal. At most one non-done run exists at a time.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRun {
    pub id: RunId,
    pub status: RunStatus,
    pub started_at: f32,
}

#[derive(Debug)]
enum RevealPhase {
    Expanding,
    Fading,
}

#[derive(Debug)]
struct ActiveReveal {
    run: TransitionRun,
    phase: RevealPhase,
    t: f32,
    pending: Mode,
}

#[derive(Debug)]
pub struct RevealTransition {
    mode: Mode,
    active: Option<ActiveReveal>,
}

impl RevealTransition {
    pub fn new(default_mode: Mode) -> Self {
        Self {
            mode: default_mode,
            active: None,
        }
    }

    /// Restore the persisted mode at attach time so a reload keeps the flag.
    pub fn restore(&mut self, host: &mut HostContext<'_>) {
        match host.store.get(MODE_STORE_KEY) {
            Ok(Some(raw)) => {
                if let Some(mode) = Mode::parse(&raw) {
                    self.mode = mode;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("mode restore skipped: {e}"),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn run(&self) -> Option<&TransitionRun> {
        self.active.as_ref().map(|a| &a.run)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Start a reveal anchored at `origin`. Rejected as a no-op while a run
    /// is in flight; returns whether a run (or an immediate apply) happened.
    pub fn trigger(
        &mut self,
        origin: Point,
        now: f32,
        ids: &mut IdAllocator,
        cfg: &Config,
        host: &mut HostContext<'_>,
        outputs: &mut Outputs,
    ) -> bool {
        if self.active.is_some() {
            debug!("reveal trigger ignored: run in flight");
            return false;
        }
        let next = self.mode.flipped();

        if host.reduced_motion {
            self.apply_mode(next, host, outputs);
            return true;
        }

        let radius = cover_radius(origin, host.viewport) * cfg.reveal_margin;
        self.active = Some(ActiveReveal {
            run: TransitionRun {
                id: ids.alloc_run(),
                status: RunStatus::Running,
                started_at: now,
            },
            phase: RevealPhase::Expanding,
            t: 0.0,
            pending: next,
        });
        outputs.push_change(keys::REVEAL_RADIUS, radius);
        outputs.push_change(keys::REVEAL_SCALE, 0.0);
        outputs.push_change(keys::REVEAL_OPACITY, 1.0);
        outputs.push_change(keys::REVEAL_ACTIVE, 1.0);
        true
    }

    /// Advance an in-flight run by `dt` milliseconds.
    pub fn update(
        &mut self,
        dt: f32,
        cfg: &Config,
        host: &mut HostContext<'_>,
        outputs: &mut Outputs,
    ) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.t += dt;
        let mut apply: Option<Mode> = None;
        let mut settled = false;
        match active.phase {
            RevealPhase::Expanding => {
                let u = (active.t / cfg.reveal_expand_ms).clamp(0.0, 1.0);
                outputs.push_change(keys::REVEAL_SCALE, u);
                if active.t >= cfg.reveal_expand_ms {
                    // Full coverage: the one point where observable state
                    // flips, persisted before the fade begins.
                    apply = Some(active.pending);
                    active.run.status = RunStatus::Settling;
                    active.phase = RevealPhase::Fading;
                    active.t -= cfg.reveal_expand_ms;
                }
            }
            RevealPhase::Fading => {
                let u = (active.t / cfg.reveal_fade_ms).clamp(0.0, 1.0);
                outputs.push_change(keys::REVEAL_OPACITY, 1.0 - u);
                if active.t >= cfg.reveal_fade_ms {
                    active.run.status = RunStatus::Done;
                    settled = true;
                }
            }
        }
        if let Some(next) = apply {
            self.apply_mode(next, host, outputs);
        }
        if settled {
            outputs.push_change(keys::REVEAL_ACTIVE, 0.0);
            self.active = None;
        }
    }

    fn apply_mode(&mut self, next: Mode, host: &mut HostContext<'_>, outputs: &mut Outputs) {
        self.mode = next;
        if let Err(e) = host.store.set(MODE_STORE_KEY, next.as_str()) {
            warn!("mode persist failed: {e}");
            outputs.push_event(CoreEvent::Error {
                message: format!("mode persist failed: {e}"),
            });
        }
        outputs.push_event(CoreEvent::ModeApplied { mode: next });
    }

    /// Teardown mid-run: drop the run without flipping the mode.
    pub fn detach(&mut self) {
        self.active = None;
    }
}
