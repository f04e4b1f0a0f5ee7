//! In-memory durable mirror for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{DurableMirror, MirrorError, MirrorResult};

/// Thread-safe in-memory key-value mirror with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMirror {
    state: Arc<RwLock<InMemoryMirrorState>>,
}

#[derive(Debug, Default)]
struct InMemoryMirrorState {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl InMemoryMirror {
    /// Creates an empty, unbounded mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mirror that rejects values larger than `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        let mirror = Self::new();
        if let Ok(mut state) = mirror.state.write() {
            state.quota = Some(quota);
        }
        mirror
    }

    /// Creates a mirror pre-populated with `value` under `key`.
    #[must_use]
    pub fn seeded(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mirror = Self::new();
        if let Ok(mut state) = mirror.state.write() {
            state.items.insert(key.into(), value.into());
        }
        mirror
    }

    /// Changes the quota; `None` removes it.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError::Io`] when the internal lock is poisoned.
    pub fn set_quota(&self, quota: Option<usize>) -> MirrorResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.quota = quota;
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> MirrorError {
    MirrorError::io(std::io::Error::other(err.to_string()))
}

impl DurableMirror for InMemoryMirror {
    fn get_item(&self, key: &str) -> MirrorResult<Option<String>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> MirrorResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(quota) = state.quota {
            if value.len() > quota {
                return Err(MirrorError::QuotaExceeded {
                    key: key.to_owned(),
                    size: value.len(),
                    quota,
                });
            }
        }
        state.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
