//! Persisted key/value state (string-valued), e.g. web localStorage.

use thiserror::Error;

/// Errors surfaced by a host store. The core absorbs these (a failed persist
/// never aborts a running transition) but reports them as events.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected for key '{key}': {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Durable string key/value storage owned by the host.
pub trait StateStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
