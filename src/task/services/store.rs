//! Authoritative task collection with a write-through durable mirror.

use std::sync::{PoisonError, RwLock};
use thiserror::Error;

use crate::task::{
    domain::Task,
    ports::{DurableMirror, MirrorError},
};

/// Default mirror key for the serialized task collection.
pub const TASKS_STORAGE_KEY: &str = "taskai-tasks";

/// Non-fatal persistence problem.
///
/// The in-memory collection stays authoritative whenever one of these is
/// reported; the system keeps running without durability.
#[derive(Debug, Clone, Error)]
pub enum StoreWarning {
    /// The mirror could not be read.
    #[error("could not read saved tasks: {0}")]
    Read(#[source] MirrorError),

    /// The mirror held a value that is not a task collection.
    #[error("saved tasks are unreadable and were ignored: {0}")]
    Decode(String),

    /// The collection could not be serialized.
    #[error("could not serialize tasks: {0}")]
    Encode(String),

    /// The mirror rejected the write.
    #[error("could not save tasks: {0}")]
    Write(#[source] MirrorError),
}

/// Value produced by a store-touching operation plus any persistence warning.
#[derive(Debug, Clone)]
#[must_use]
pub struct StoreOutcome<T> {
    /// Operation result.
    pub value: T,
    /// Set when the durable mirror could not be kept in sync.
    pub warning: Option<StoreWarning>,
}

impl<T> StoreOutcome<T> {
    /// Wraps a value with no warning.
    pub const fn clean(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    /// Returns the value, discarding any warning.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transforms the value, keeping the warning.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StoreOutcome<U> {
        StoreOutcome {
            value: f(self.value),
            warning: self.warning,
        }
    }
}

/// In-memory ordered task collection mirrored to durable storage.
///
/// Every change rewrites the whole collection under a single key.
#[derive(Debug)]
pub struct TaskStore<M>
where
    M: DurableMirror,
{
    mirror: M,
    key: String,
    tasks: RwLock<Vec<Task>>,
}

impl<M> TaskStore<M>
where
    M: DurableMirror,
{
    /// Opens a store and loads the mirrored collection under `key`.
    ///
    /// Load problems are returned as a warning alongside an empty store.
    pub fn open(mirror: M, key: impl Into<String>) -> StoreOutcome<Self> {
        let key = key.into();
        let loaded = load(&mirror, &key);
        loaded.map(|tasks| Self {
            mirror,
            key,
            tasks: RwLock::new(tasks),
        })
    }

    /// Returns the mirror key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a copy of the collection in stored order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs `read` against the collection without copying it.
    pub fn read<T>(&self, read: impl FnOnce(&[Task]) -> T) -> T {
        let tasks = self.tasks.read().unwrap_or_else(PoisonError::into_inner);
        read(&tasks)
    }

    /// Applies `change` to the collection and writes it through when the
    /// closure reports a modification.
    ///
    /// The closure returns the operation's value and whether anything
    /// changed. Unchanged collections are not rewritten.
    pub fn mutate<T>(&self, change: impl FnOnce(&mut Vec<Task>) -> (T, bool)) -> StoreOutcome<T> {
        let mut tasks = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        let (value, changed) = change(&mut tasks);
        if !changed {
            return StoreOutcome::clean(value);
        }
        let warning = save(&self.mirror, &self.key, &tasks);
        StoreOutcome { value, warning }
    }
}

/// Reads the collection under `key`.
///
/// Missing data yields an empty collection; unreadable data yields an empty
/// collection and a warning.
pub fn load(mirror: &impl DurableMirror, key: &str) -> StoreOutcome<Vec<Task>> {
    let raw = match mirror.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return StoreOutcome::clean(Vec::new()),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read task mirror");
            return StoreOutcome {
                value: Vec::new(),
                warning: Some(StoreWarning::Read(err)),
            };
        }
    };

    match serde_json::from_str::<Vec<Task>>(&raw) {
        Ok(tasks) => {
            tracing::debug!(key, count = tasks.len(), "loaded tasks");
            StoreOutcome::clean(tasks)
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding unreadable task mirror");
            StoreOutcome {
                value: Vec::new(),
                warning: Some(StoreWarning::Decode(err.to_string())),
            }
        }
    }
}

/// Writes the whole collection under `key`, returning a warning on failure.
pub fn save(mirror: &impl DurableMirror, key: &str, tasks: &[Task]) -> Option<StoreWarning> {
    let encoded = match serde_json::to_string(tasks) {
        Ok(encoded) => encoded,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to serialize tasks");
            return Some(StoreWarning::Encode(err.to_string()));
        }
    };
    match mirror.set_item(key, &encoded) {
        Ok(()) => {
            tracing::debug!(key, count = tasks.len(), "saved tasks");
            None
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to save tasks; continuing unsaved");
            Some(StoreWarning::Write(err))
        }
    }
}
