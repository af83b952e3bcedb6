//! NavigationCoordinator: begin/commit protocol around an outbound
//! navigation, with a deadline so the transition always completes.
//!
//! A pending navigation resolves exactly once, from whichever fires first: a
//! route-change confirmation matching the target, the fallback deadline, or a
//! newer navigation superseding it.
//! The losing path's attempt is a guaranteed no-op: resolution is keyed by the
//! pending run's token, not a boolean, so a confirmation belonging to an
//! already-superseded navigation cannot resolve a newer one. Navigating to the
//! current path resolves via the deadline rather than hanging on a change
//! event that will never fire.
//!
//! Hosts forward only plain left clicks here; modified clicks and
//! open-in-new-tab keep their default behavior by never reaching the
//! coordinator.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use segue_host_core::HostContext;

use crate::config::Config;
use crate::ids::{IdAllocator, RunId};
use crate::outputs::{CoreEvent, Outputs, ResolvedVia};

/// A started-but-unconfirmed route change. Exactly one may be outstanding.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingNavigation {
    pub target_url: String,
    pub token: RunId,
    pub deadline: f32,
}

#[derive(Debug, Default)]
pub struct NavigationCoordinator {
    pending: Option<PendingNavigation>,
}

impl NavigationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingNavigation> {
        self.pending.as_ref()
    }

    /// Issue a navigation. Without the transition primitive this degrades to
    /// a plain push with no masking and nothing pending.
    pub fn navigate(
        &mut self,
        url: &str,
        now: f32,
        ids: &mut IdAllocator,
        cfg: &Config,
        host: &mut HostContext<'_>,
        outputs: &mut Outputs,
    ) -> anyhow::Result<()> {
        if !host.router.supports_view_transitions() {
            debug!("view transitions unavailable, plain navigation to {url}");
            host.router.push(url)?;
            return Ok(());
        }

        // A second navigation supersedes the first. The old entry still
        // resolves exactly once -- here, via the superseded path -- so the
        // host's begin/commit scope for it always commits.
        if let Some(old) = self.pending.take() {
            warn!(
                "navigation to {} superseded by {url}",
                old.target_url
            );
            outputs.push_event(CoreEvent::NavigationResolved {
                url: old.target_url,
                via: ResolvedVia::Superseded,
            });
        }

        host.router.push(url)?;
        self.pending = Some(PendingNavigation {
            target_url: url.to_string(),
            token: ids.alloc_run(),
            deadline: now + cfg.nav_deadline_ms,
        });
        outputs.push_event(CoreEvent::NavigationStarted {
            url: url.to_string(),
        });
        Ok(())
    }

    /// Host confirmation that the route observably changed.
    pub fn on_route_changed(&mut self, path: &str, outputs: &mut Outputs) {
        let token = match self.pending.as_ref() {
            Some(p) if p.target_url == path => p.token,
            _ => return,
        };
        self.resolve(token, ResolvedVia::RouteChanged, outputs);
    }

    /// Deadline sweep, run once per tick against the engine clock.
    pub fn update(&mut self, now: f32, outputs: &mut Outputs) {
        let token = match self.pending.as_ref() {
            Some(p) if now >= p.deadline => p.token,
            _ => return,
        };
        self.resolve(token, ResolvedVia::Deadline, outputs);
    }

    /// Resolve the pending navigation iff `token` still identifies it.
    fn resolve(&mut self, token: RunId, via: ResolvedVia, outputs: &mut Outputs) {
        if self.pending.as_ref().map(|p| p.token) != Some(token) {
            return;
        }
        if let Some(pending) = self.pending.take() {
            outputs.push_event(CoreEvent::NavigationResolved {
                url: pending.target_url,
                via,
            });
        }
    }

    /// Teardown: drop the pending entry without resolving it.
    pub fn detach(&mut self) {
        self.pending = None;
    }
}
