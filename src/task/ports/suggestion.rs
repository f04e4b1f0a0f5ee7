//! AI suggestion port.
//!
//! Adapters turn task text into suggested checklist items. Each call is a
//! single request and response; the port neither retries nor times out.

use crate::task::domain::{Task, TaskDraft};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for suggestion adapter operations.
pub type SuggestionResult<T> = Result<T, SuggestionError>;

/// Hosted suggestion service contract.
#[async_trait]
pub trait SuggestionAdapter: Send + Sync {
    /// Suggests subtasks for a task description. Three are expected but not
    /// enforced.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError`] when the service fails or replies with a
    /// payload that does not match the expected shape.
    async fn suggest_subtasks(
        &self,
        request: &SubtaskSuggestionRequest,
    ) -> SuggestionResult<SubtaskSuggestions>;

    /// Suggests concise, actionable steps for an existing task. Three to five
    /// steps of a few words each are expected but not enforced.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError`] when the service fails or replies with a
    /// payload that does not match the expected shape.
    async fn suggest_detailed_steps(
        &self,
        request: &DetailedStepsRequest,
    ) -> SuggestionResult<DetailedSteps>;
}

/// Which suggestion operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// Subtask suggestions for a new task.
    Subtasks,
    /// Detailed steps for an existing task.
    DetailedSteps,
}

/// Input for subtask suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskSuggestionRequest {
    task_description: String,
}

impl SubtaskSuggestionRequest {
    /// Creates a request, rejecting an empty description.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::InvalidInput`] when the trimmed description
    /// is empty.
    pub fn new(task_description: impl Into<String>) -> SuggestionResult<Self> {
        let task_description = task_description.into();
        if task_description.trim().is_empty() {
            return Err(SuggestionError::InvalidInput(
                "Task description cannot be empty.".to_owned(),
            ));
        }
        Ok(Self { task_description })
    }

    /// Builds a request from an already validated draft.
    #[must_use]
    pub fn from_draft(draft: &TaskDraft) -> Self {
        Self {
            task_description: draft.description().as_str().to_owned(),
        }
    }

    /// Returns the task description.
    #[must_use]
    pub fn task_description(&self) -> &str {
        &self.task_description
    }
}

/// Input for detailed step suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedStepsRequest {
    task_title: String,
    task_description: String,
}

impl DetailedStepsRequest {
    /// Creates a request, rejecting an empty title or description.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::InvalidInput`] listing every empty field.
    pub fn new(
        task_title: impl Into<String>,
        task_description: impl Into<String>,
    ) -> SuggestionResult<Self> {
        let task_title = task_title.into();
        let task_description = task_description.into();

        let mut problems = Vec::new();
        if task_title.trim().is_empty() {
            problems.push("Task title cannot be empty.");
        }
        if task_description.trim().is_empty() {
            problems.push("Task description cannot be empty.");
        }
        if !problems.is_empty() {
            return Err(SuggestionError::InvalidInput(problems.join(", ")));
        }

        Ok(Self {
            task_title,
            task_description,
        })
    }

    /// Builds a request from a stored task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_title: task.title().as_str().to_owned(),
            task_description: task.description().as_str().to_owned(),
        }
    }

    /// Returns the task title.
    #[must_use]
    pub fn task_title(&self) -> &str {
        &self.task_title
    }

    /// Returns the task description.
    #[must_use]
    pub fn task_description(&self) -> &str {
        &self.task_description
    }
}

/// Suggested subtasks returned by an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskSuggestions {
    /// Suggested subtask texts in the order returned.
    pub subtasks: Vec<String>,
}

/// Detailed steps returned by an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedSteps {
    /// Step texts in the order returned.
    pub detailed_steps: Vec<String>,
}

/// Errors returned by suggestion adapters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SuggestionError {
    /// The request failed input validation.
    #[error("invalid suggestion input: {0}")]
    InvalidInput(String),

    /// The service could not be reached or rejected the call.
    #[error("suggestion service unavailable: {0}")]
    Unavailable(String),

    /// The service replied with a payload of the wrong shape.
    #[error("malformed suggestion response: {0}")]
    MalformedResponse(String),

    /// The prompt template could not be rendered.
    #[error("failed to render suggestion prompt: {0}")]
    Prompt(String),
}

impl SuggestionError {
    /// Returns the text shown to the user for this failure.
    ///
    /// Validation failures are shown verbatim; everything else collapses to a
    /// generic retry hint for the operation.
    #[must_use]
    pub fn user_message(&self, kind: SuggestionKind) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::Unavailable(_) | Self::MalformedResponse(_) | Self::Prompt(_) => match kind {
                SuggestionKind::Subtasks => {
                    "Failed to fetch AI suggestions. Please try again.".to_owned()
                }
                SuggestionKind::DetailedSteps => {
                    "Failed to fetch AI detailed steps. Please try again.".to_owned()
                }
            },
        }
    }
}
