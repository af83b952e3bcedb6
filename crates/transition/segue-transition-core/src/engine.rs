//! Engine: data ownership and the public stepping API.
//!
//! One deterministic scheduler for the four orchestrators. The host adapter
//! calls [`Engine::update`] on every animation frame with the elapsed
//! milliseconds, the inputs gathered since the last frame, and a fresh
//! [`HostContext`]; the engine applies inputs, advances each controller, and
//! returns the changes/events for the tick. All deadline checks run against
//! the engine's accumulated clock, so any interleaving of host callbacks
//! collapses to an order the core fully controls.

use log::warn;

use segue_host_core::{HostContext, ResourceHandle};

use crate::config::Config;
use crate::ids::{IdAllocator, SignalId};
use crate::inputs::{Command, Inputs};
use crate::navigation::{NavigationCoordinator, PendingNavigation};
use crate::outputs::{Mode, Outputs};
use crate::progress::{ProgressState, ReadinessProgressController};
use crate::reveal::{RevealTransition, TransitionRun};
use crate::scroll::{ScrollBridge, VirtualScrollState};

#[derive(Debug)]
pub struct Engine {
    // Owned data
    cfg: Config,
    ids: IdAllocator,
    clock_ms: f32,

    // Document resources
    scroll_lock: ResourceHandle,

    // Orchestrators
    loader: ReadinessProgressController,
    reveal: RevealTransition,
    nav: NavigationCoordinator,
    scroll: ScrollBridge,

    // Per-tick outputs
    outputs: Outputs,
}

impl Engine {
    /// Create an engine. The loader takes the scroll lock immediately; it is
    /// given back in the same path that reports loading complete.
    pub fn new(cfg: Config) -> Self {
        let scroll_lock = ResourceHandle::new();
        let mut loader = ReadinessProgressController::new();
        loader.attach(&scroll_lock);
        Self {
            cfg,
            ids: IdAllocator::new(),
            clock_ms: 0.0,
            scroll_lock,
            loader,
            reveal: RevealTransition::new(Mode::Light),
            nav: NavigationCoordinator::new(),
            scroll: ScrollBridge::new(),
            outputs: Outputs::default(),
        }
    }

    /// One-time host wiring: restore the persisted mode and report whether
    /// the scroll smoothing subsystem initialized. Returns the attach-time
    /// outputs (e.g. a degradation event).
    pub fn attach(&mut self, host: &mut HostContext<'_>, scroll_init_ok: bool) -> &Outputs {
        self.outputs.clear();
        self.reveal.restore(host);
        self.scroll.attach(scroll_init_ok, &mut self.outputs);
        &self.outputs
    }

    /// Declare a readiness signal with its progress floor.
    pub fn register_signal(&mut self, floor: f32) -> SignalId {
        let id = self.ids.alloc_signal();
        self.loader.register_signal(id, floor);
        id
    }

    /// Step the orchestrators by `dt_ms` with the given inputs.
    pub fn update(
        &mut self,
        dt_ms: f32,
        inputs: Inputs,
        host: &mut HostContext<'_>,
    ) -> anyhow::Result<&Outputs> {
        self.outputs.clear();
        self.clock_ms += dt_ms;

        // 1) Apply host signals and triggers before stepping.
        for signal in inputs.signals {
            self.loader.assert_signal(signal);
        }
        for cmd in inputs.commands {
            match cmd {
                Command::ToggleMode { origin } => {
                    self.reveal.trigger(
                        origin,
                        self.clock_ms,
                        &mut self.ids,
                        &self.cfg,
                        host,
                        &mut self.outputs,
                    );
                }
                Command::Navigate { url } => {
                    self.nav.navigate(
                        &url,
                        self.clock_ms,
                        &mut self.ids,
                        &self.cfg,
                        host,
                        &mut self.outputs,
                    )?;
                }
                Command::RouteChanged { path } => {
                    self.nav.on_route_changed(&path, &mut self.outputs);
                }
                Command::ScrollDelta { delta } => self.scroll.on_delta(delta),
                Command::DetachScroll => self.scroll.detach(),
                Command::Teardown => self.teardown(),
            }
        }

        // 2) Advance each controller.
        self.loader
            .update(dt_ms, &self.cfg, host.reduced_motion, &mut self.outputs);
        self.reveal.update(dt_ms, &self.cfg, host, &mut self.outputs);
        self.nav.update(self.clock_ms, &mut self.outputs);
        self.scroll.update(dt_ms, &self.cfg, &mut self.outputs);

        // 3) Backpressure on events.
        if self.outputs.events.len() > self.cfg.max_events_per_tick {
            warn!(
                "dropping {} events over the per-tick cap",
                self.outputs.events.len() - self.cfg.max_events_per_tick
            );
            self.outputs.events.truncate(self.cfg.max_events_per_tick);
        }

        Ok(&self.outputs)
    }

    /// Cancel every pending run and release all document resources,
    /// regardless of run phase.
    pub fn teardown(&mut self) {
        self.loader.detach();
        self.reveal.detach();
        self.nav.detach();
        self.scroll.detach();
    }

    // -- Public state read by the host page --------------------------------

    pub fn is_loading_complete(&self) -> bool {
        self.loader.is_complete()
    }

    pub fn progress(&self) -> &ProgressState {
        self.loader.state()
    }

    pub fn mode(&self) -> Mode {
        self.reveal.mode()
    }

    pub fn reveal_run(&self) -> Option<&TransitionRun> {
        self.reveal.run()
    }

    pub fn pending_navigation(&self) -> Option<&PendingNavigation> {
        self.nav.pending()
    }

    pub fn virtual_scroll(&self) -> &VirtualScrollState {
        self.scroll.state()
    }

    pub fn scroll_lock_held(&self) -> bool {
        self.scroll_lock.is_held()
    }

    pub fn clock_ms(&self) -> f32 {
        self.clock_ms
    }
}
