//! Checklist items owned by a task.

use super::{SubtaskId, TaskDomainError};
use serde::{Deserialize, Serialize};

/// A smaller checklist item belonging to exactly one task.
///
/// Completion is independent of the owning task's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    text: String,
    completed: bool,
}

impl Subtask {
    /// Creates an incomplete subtask with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptySubtaskText`] when the trimmed text is
    /// empty.
    pub fn new(text: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = text.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptySubtaskText);
        }
        Ok(Self {
            id: SubtaskId::new(),
            text: trimmed.to_owned(),
            completed: false,
        })
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the subtask has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Flips the completion flag.
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
