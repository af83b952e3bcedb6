//! segue-host-core: the capability seam between the segue core and its host.
//!
//! The core never touches the document, the router, or persistent storage
//! directly. Hosts implement the traits here and hand them to the engine each
//! tick through [`HostContext`]. Document-level shared state (scroll lock,
//! overlay element) is modeled as explicit [`resource`] handles so that
//! release-on-all-paths is enforced by a type rather than by convention.

pub mod resource;
pub mod router;
pub mod store;
pub mod viewport;

pub use resource::{ResourceGuard, ResourceHandle};
pub use router::{Router, RouterError};
pub use store::{StateStore, StoreError};
pub use viewport::{cover_radius, Point, Viewport};

/// Borrowed host capabilities for one engine tick.
///
/// Rebuilt by the adapter on every call; the core holds no long-lived
/// references into the host.
pub struct HostContext<'a> {
    pub store: &'a mut dyn StateStore,
    pub router: &'a mut dyn Router,
    /// The user's reduced-motion preference at the time of this tick.
    pub reduced_motion: bool,
    pub viewport: Viewport,
}
