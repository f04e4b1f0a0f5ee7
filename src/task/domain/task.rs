//! Task aggregate root and related task lifecycle types.

use super::{
    ParseTaskPriorityError, ParseTaskStatusError, Subtask, SubtaskId, TaskDescription, TaskDraft,
    TaskId, TaskTitle,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
///
/// The status graph is fully connected: any status may move to any other
/// directly, and subtask completion never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[serde(rename = "To Do")]
    ToDo,
    /// Work is under way.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is finished.
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// All statuses in rank order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Completed];

    /// Returns the persisted display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Returns the sort rank (`ToDo` = 1 through `Completed` = 3).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::ToDo => 1,
            Self::InProgress => 2,
            Self::Completed => 3,
        }
    }

    /// Returns whether a transition to `target` is permitted.
    ///
    /// Every status may move to every other status, including itself.
    #[must_use]
    pub const fn can_transition_to(self, _target: Self) -> bool {
        true
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "to do" | "to_do" | "todo" | "to-do" => Ok(Self::ToDo),
            "in progress" | "in_progress" | "in-progress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Optional task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Least urgent.
    Low,
    /// Moderately urgent.
    Medium,
    /// Most urgent.
    High,
}

impl TaskPriority {
    /// Returns the display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns the sort rank (`High` = 1 through `Low` = 3).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Completed and total subtask counts for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtaskProgress {
    /// Number of completed subtasks.
    pub completed: usize,
    /// Number of subtasks.
    pub total: usize,
}

impl SubtaskProgress {
    /// Returns `true` when every subtask is complete (vacuously for none).
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.completed == self.total
    }
}

/// Task aggregate root.
///
/// Serialized with camelCase keys; absent optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<TaskPriority>,
    #[serde(default)]
    subtasks: Vec<Subtask>,
}

impl Task {
    /// Materializes a confirmed draft into a `ToDo` task.
    ///
    /// One incomplete subtask is created per selected text, in order. Blank
    /// texts are skipped.
    #[must_use]
    pub fn from_draft<I, S>(draft: TaskDraft, subtask_texts: I, clock: &impl Clock) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (title, description, due_date, priority) = draft.into_parts();

        Self {
            id: TaskId::new(),
            title,
            description,
            status: TaskStatus::ToDo,
            created_at: clock.utc(),
            due_date,
            priority,
            subtasks: build_subtasks(subtask_texts),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the subtasks in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the subtask with the given identifier, if present.
    #[must_use]
    pub fn subtask(&self, subtask_id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|subtask| subtask.id() == subtask_id)
    }

    /// Replaces the status.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Flips completion of the matching subtask.
    ///
    /// Returns `false` without changes when no subtask has the identifier.
    pub fn toggle_subtask(&mut self, subtask_id: SubtaskId) -> bool {
        let Some(subtask) = self
            .subtasks
            .iter_mut()
            .find(|subtask| subtask.id() == subtask_id)
        else {
            return false;
        };
        subtask.toggle();
        true
    }

    /// Discards every existing subtask and installs fresh ones.
    ///
    /// Prior completion state is lost. Blank texts are skipped.
    pub fn replace_subtasks<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtasks = build_subtasks(texts);
    }

    /// Returns completed and total subtask counts.
    #[must_use]
    pub fn subtask_progress(&self) -> SubtaskProgress {
        SubtaskProgress {
            completed: self
                .subtasks
                .iter()
                .filter(|subtask| subtask.is_completed())
                .count(),
            total: self.subtasks.len(),
        }
    }
}

fn build_subtasks<I, S>(texts: I) -> Vec<Subtask>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .filter_map(|text| Subtask::new(text).ok())
        .collect()
}
