//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("Title is required")]
    EmptyTitle,

    /// The title exceeds the form limit.
    #[error("Title must be {max} characters or less (got {actual})")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        actual: usize,
    },

    /// The description is empty after trimming.
    #[error("Description is required")]
    EmptyDescription,

    /// The description exceeds the form limit.
    #[error("Description must be {max} characters or less (got {actual})")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected description in characters.
        actual: usize,
    },

    /// A subtask text is empty after trimming.
    #[error("subtask text must not be empty")]
    EmptySubtaskText,
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing a sort option such as `createdAt-desc`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort option '{0}', expected <key>-<asc|desc>")]
pub struct ParseTaskOrderingError(pub String);
