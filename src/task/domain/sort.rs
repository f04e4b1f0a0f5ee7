//! Task list ordering.
//!
//! `createdAt`, `title` and `status` invert the primary comparison for
//! descending order. `priority` and `dueDate` do not: tasks without a
//! priority or due date sort last in both directions. Equal primary keys
//! always fall back to ascending creation time.

use super::{ParseTaskOrderingError, Task, TaskPriority};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field a task list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSortKey {
    /// Creation timestamp.
    CreatedAt,
    /// Title text.
    Title,
    /// Status rank.
    Status,
    /// Priority rank.
    Priority,
    /// Due date.
    DueDate,
}

impl TaskSortKey {
    /// Returns the option-value spelling of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Returns the option-value spelling of the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskOrdering {
    /// Field to order by.
    pub key: TaskSortKey,
    /// Direction to order in.
    pub direction: SortDirection,
}

impl TaskOrdering {
    /// Newest tasks first.
    pub const NEWEST_FIRST: Self = Self::new(TaskSortKey::CreatedAt, SortDirection::Desc);

    /// Creates an ordering.
    #[must_use]
    pub const fn new(key: TaskSortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Human-readable label for the ordering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match (self.key, self.direction) {
            (TaskSortKey::CreatedAt, SortDirection::Desc) => "Creation Date (Newest)",
            (TaskSortKey::CreatedAt, SortDirection::Asc) => "Creation Date (Oldest)",
            (TaskSortKey::DueDate, SortDirection::Asc) => "Due Date (Soonest)",
            (TaskSortKey::DueDate, SortDirection::Desc) => "Due Date (Latest)",
            (TaskSortKey::Priority, SortDirection::Asc) => "Priority (High to Low)",
            (TaskSortKey::Priority, SortDirection::Desc) => "Priority (Low to High)",
            (TaskSortKey::Status, SortDirection::Asc) => "Status (A-Z)",
            (TaskSortKey::Status, SortDirection::Desc) => "Status (Z-A)",
            (TaskSortKey::Title, SortDirection::Asc) => "Title (A-Z)",
            (TaskSortKey::Title, SortDirection::Desc) => "Title (Z-A)",
        }
    }
}

impl Default for TaskOrdering {
    fn default() -> Self {
        Self::NEWEST_FIRST
    }
}

impl fmt::Display for TaskOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.key.as_str(), self.direction.as_str())
    }
}

impl FromStr for TaskOrdering {
    type Err = ParseTaskOrderingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTaskOrderingError(value.to_owned());
        let (raw_key, raw_direction) = value.trim().rsplit_once('-').ok_or_else(invalid)?;
        let key = match raw_key.to_ascii_lowercase().as_str() {
            "createdat" | "created_at" | "created" => TaskSortKey::CreatedAt,
            "title" => TaskSortKey::Title,
            "status" => TaskSortKey::Status,
            "priority" => TaskSortKey::Priority,
            "duedate" | "due_date" | "due" => TaskSortKey::DueDate,
            _ => return Err(invalid()),
        };
        let direction = match raw_direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(invalid()),
        };
        Ok(Self::new(key, direction))
    }
}

/// Compares two tasks under `ordering`, breaking ties by ascending creation
/// time.
#[must_use]
pub fn compare_tasks(a: &Task, b: &Task, ordering: TaskOrdering) -> Ordering {
    let direction = ordering.direction;
    let primary = match ordering.key {
        TaskSortKey::CreatedAt => direction.apply(a.created_at().cmp(&b.created_at())),
        TaskSortKey::Title => direction.apply(collate(a.title().as_str(), b.title().as_str())),
        TaskSortKey::Status => direction.apply(a.status().rank().cmp(&b.status().rank())),
        TaskSortKey::Priority => compare_priority(a.priority(), b.priority(), direction),
        TaskSortKey::DueDate => compare_due_date(a.due_date(), b.due_date(), direction),
    };
    primary.then_with(|| a.created_at().cmp(&b.created_at()))
}

/// Sorts tasks in place; the sort is stable.
pub fn sort_tasks(tasks: &mut [Task], ordering: TaskOrdering) {
    tasks.sort_by(|a, b| compare_tasks(a, b, ordering));
}

/// Unset priorities rank after `Low` whichever way the list runs.
fn compare_priority(
    a: Option<TaskPriority>,
    b: Option<TaskPriority>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => direction.apply(left.rank().cmp(&right.rank())),
    }
}

/// Missing due dates sit at the far end of the list in both directions.
fn compare_due_date(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => direction.apply(left.cmp(&right)),
    }
}

/// Case-insensitive comparison with a code-point fallback so distinct
/// strings never compare equal.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
