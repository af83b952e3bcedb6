//! ReadinessProgressController: bounded, monotonic loading progress with a
//! single-shot exit.
//!
//! Independent readiness signals (document interactive, fonts settled,
//! elapsed-time floors) each push a shared target upward; the displayed value
//! chases the target by exponential smoothing on a fixed cadence and never
//! decreases. The exit fires exactly once, when the completion rule holds:
//!
//!   current >= complete_threshold
//!   AND elapsed >= min_display_ms
//!   AND (all signals satisfied OR elapsed >= max_display_ms)
//!
//! The max-display clause is a liveness deadline: it triggers the exit even
//! if a signal never satisfies and the asserted floors never reach the
//! threshold, so a stalled external resource cannot hold the page hostage.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use segue_host_core::{ResourceGuard, ResourceHandle};

use crate::config::Config;
use crate::ids::SignalId;
use crate::outputs::{keys, CoreEvent, Outputs};

/// One-directional lifecycle of the progress value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProgressPhase {
    Init,
    Accumulating,
    Converging,
    Complete,
}

/// Invariant: `0 <= current <= target <= 100`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ProgressState {
    pub current: f32,
    pub target: f32,
    pub phase: ProgressPhase,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            phase: ProgressPhase::Init,
        }
    }
}

#[derive(Debug)]
struct RegisteredSignal {
    floor: f32,
    satisfied: bool,
}

/// Fixed ordered exit animation: fade the loader content, then expand the
/// reveal shape to cover the viewport, then hide the container.
#[derive(Debug)]
enum ExitStep {
    FadeContent,
    ExpandShape,
}

#[derive(Debug)]
struct ExitSequence {
    step: ExitStep,
    t: f32,
}

#[derive(Debug, Default)]
pub struct ReadinessProgressController {
    state: ProgressState,
    signals: HashMap<SignalId, RegisteredSignal>,
    elapsed: f32,
    /// Carry-over toward the next fixed convergence step.
    accum: f32,
    exit: Option<ExitSequence>,
    completed: bool,
    detached: bool,
    scroll_guard: Option<ResourceGuard>,
}

impl ReadinessProgressController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress page scroll for the controller's lifetime. The guard is
    /// dropped in [`finish`], the single code path that marks completion.
    pub fn attach(&mut self, scroll_lock: &ResourceHandle) {
        if self.scroll_guard.is_none() {
            self.scroll_guard = scroll_lock.acquire();
        }
    }

    /// Declare a readiness signal that must satisfy before the loader may
    /// exit ahead of the max-display deadline.
    pub fn register_signal(&mut self, id: SignalId, floor: f32) {
        self.signals.insert(
            id,
            RegisteredSignal {
                floor: floor.clamp(0.0, 100.0),
                satisfied: false,
            },
        );
    }

    /// Mark a signal satisfied, raising the target to its floor. Commutative
    /// and idempotent: asserting twice, or out of order, yields the same
    /// target.
    pub fn assert_signal(&mut self, id: SignalId) {
        if self.completed {
            return;
        }
        if let Some(sig) = self.signals.get_mut(&id) {
            sig.satisfied = true;
            let floor = sig.floor;
            self.raise_target(floor);
        }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn holds_scroll_lock(&self) -> bool {
        self.scroll_guard.is_some()
    }

    fn all_satisfied(&self) -> bool {
        self.signals.values().all(|s| s.satisfied)
    }

    fn raise_target(&mut self, floor: f32) {
        let floor = floor.clamp(0.0, 100.0);
        if floor > self.state.target {
            self.state.target = floor;
        }
    }

    /// Advance by `dt` milliseconds.
    pub fn update(&mut self, dt: f32, cfg: &Config, reduced_motion: bool, outputs: &mut Outputs) {
        if self.completed || self.detached {
            return;
        }
        if self.state.phase == ProgressPhase::Init {
            self.state.phase = ProgressPhase::Accumulating;
        }
        self.elapsed += dt;

        // Reduced motion is a hard precondition: no animation, no intermediate
        // progress frames, completion now. The scroll lock is still released
        // through the same finish path.
        if reduced_motion {
            self.finish(outputs);
            return;
        }

        if self.exit.is_some() {
            self.advance_exit(dt, cfg, outputs);
            return;
        }

        // Elapsed-time floors assert themselves.
        for tf in &cfg.timed_floors {
            if self.elapsed >= tf.at_ms {
                self.raise_target(tf.floor);
            }
        }
        // With every signal satisfied (vacuously so when none are
        // registered) there is nothing left to wait for; run the bar out so
        // the threshold check can pass.
        if self.all_satisfied() {
            self.raise_target(100.0);
        }

        // Fixed-cadence convergence toward the target.
        let before = self.state.current;
        self.accum += dt;
        while self.accum >= cfg.convergence_interval_ms {
            self.accum -= cfg.convergence_interval_ms;
            let gap = self.state.target - self.state.current;
            if gap <= 0.0 {
                continue;
            }
            if gap <= cfg.snap_epsilon {
                self.state.current = self.state.target;
            } else {
                self.state.current += gap * cfg.smoothing;
            }
        }
        if self.state.current != before {
            outputs.push_change(keys::LOADER_PROGRESS, self.state.current);
        }

        // Completion rule. Past the max-display deadline the loader exits
        // unconditionally, snapping progress to 100 first.
        let deadline_hit = self.elapsed >= cfg.max_display_ms;
        let ready = self.state.current >= cfg.complete_threshold
            && self.elapsed >= cfg.min_display_ms
            && (self.all_satisfied() || deadline_hit);
        if ready || deadline_hit {
            if deadline_hit && self.state.current < 100.0 {
                self.state.target = 100.0;
                self.state.current = 100.0;
                outputs.push_change(keys::LOADER_PROGRESS, 100.0);
            }
            self.begin_exit(outputs);
        }
    }

    fn begin_exit(&mut self, outputs: &mut Outputs) {
        if self.exit.is_some() {
            return;
        }
        self.state.phase = ProgressPhase::Converging;
        self.exit = Some(ExitSequence {
            step: ExitStep::FadeContent,
            t: 0.0,
        });
        outputs.push_event(CoreEvent::ExitStarted);
        outputs.push_change(keys::LOADER_CONTENT_OPACITY, 1.0);
        outputs.push_change(keys::LOADER_SHAPE_SCALE, 0.0);
    }

    fn advance_exit(&mut self, dt: f32, cfg: &Config, outputs: &mut Outputs) {
        let Some(exit) = self.exit.as_mut() else {
            return;
        };
        exit.t += dt;
        let mut done = false;
        match exit.step {
            ExitStep::FadeContent => {
                let u = (exit.t / cfg.exit_fade_ms).clamp(0.0, 1.0);
                outputs.push_change(keys::LOADER_CONTENT_OPACITY, 1.0 - u);
                if exit.t >= cfg.exit_fade_ms {
                    exit.step = ExitStep::ExpandShape;
                    exit.t -= cfg.exit_fade_ms;
                }
            }
            ExitStep::ExpandShape => {
                let u = (exit.t / cfg.exit_expand_ms).clamp(0.0, 1.0);
                outputs.push_change(keys::LOADER_SHAPE_SCALE, u);
                if exit.t >= cfg.exit_expand_ms {
                    done = true;
                }
            }
        }
        if done {
            self.finish(outputs);
        }
    }

    /// Single completion path: idempotent under concurrent triggers, hides
    /// the container, releases the scroll lock, emits the one authoritative
    /// end-of-loading event.
    fn finish(&mut self, outputs: &mut Outputs) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.exit = None;
        self.state.target = 100.0;
        self.state.current = 100.0;
        self.state.phase = ProgressPhase::Complete;
        self.scroll_guard.take();
        outputs.push_change(keys::LOADER_HIDDEN, 1.0);
        outputs.push_event(CoreEvent::LoadingComplete);
    }

    /// Teardown mid-run: cancel the exit animation and release the scroll
    /// lock without emitting completion.
    pub fn detach(&mut self) {
        self.detached = true;
        self.exit = None;
        self.scroll_guard.take();
    }
}
