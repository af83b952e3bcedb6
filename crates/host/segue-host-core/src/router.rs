//! Routing seam: the host's navigation primitive.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("navigation to '{url}' failed: {reason}")]
    PushFailed { url: String, reason: String },
}

/// A router capable of issuing navigations and reporting the current path.
///
/// `supports_view_transitions` gates the masking protocol: when it returns
/// false the core issues a plain `push` and runs no transition at all.
pub trait Router {
    fn current_path(&self) -> String;
    fn push(&mut self, url: &str) -> Result<(), RouterError>;
    fn supports_view_transitions(&self) -> bool;
}
