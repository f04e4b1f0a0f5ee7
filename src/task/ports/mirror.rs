//! Durable key-value mirror for the task collection.

use std::sync::Arc;
use thiserror::Error;

/// Result type for durable mirror operations.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Namespaced string key-value storage that survives restarts.
///
/// The store serializes the whole task collection as one value under a
/// fixed key, so implementations only need whole-value reads and writes.
pub trait DurableMirror: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError`] when the backing storage cannot be read.
    fn get_item(&self, key: &str) -> MirrorResult<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::QuotaExceeded`] when the value does not fit, or
    /// another [`MirrorError`] when the backing storage rejects the write.
    fn set_item(&self, key: &str, value: &str) -> MirrorResult<()>;
}

/// Errors returned by durable mirror implementations.
#[derive(Debug, Clone, Error)]
pub enum MirrorError {
    /// The value exceeds the storage quota.
    #[error("storage quota exceeded for '{key}': {size} bytes over a {quota} byte quota")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Size of the rejected value in bytes.
        size: usize,
        /// Configured quota in bytes.
        quota: usize,
    },

    /// The key cannot be represented by the backing storage.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// The backing storage failed.
    #[error("storage I/O error: {0}")]
    Io(Arc<std::io::Error>),
}

impl MirrorError {
    /// Wraps an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
