//! Domain model for the task manager.
//!
//! Tasks are created from validated drafts, carry an ordered checklist of
//! subtasks, and can be ordered for display. Storage and suggestion services
//! stay outside of the domain boundary.

mod draft;
mod due;
mod error;
mod ids;
mod sort;
mod subtask;
mod task;

pub use draft::{TaskDescription, TaskDraft, TaskTitle};
pub use due::DueState;
pub use error::{
    ParseTaskOrderingError, ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError,
};
pub use ids::{SubtaskId, TaskId};
pub use sort::{SortDirection, TaskOrdering, TaskSortKey, compare_tasks, sort_tasks};
pub use subtask::Subtask;
pub use task::{SubtaskProgress, Task, TaskPriority, TaskStatus};
