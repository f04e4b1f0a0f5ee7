//! Application services for task lifecycle orchestration.

mod lifecycle;
mod review;
mod store;

pub use lifecycle::{TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService};
pub use review::SuggestionReview;
pub use store::{StoreOutcome, StoreWarning, TASKS_STORAGE_KEY, TaskStore, load, save};
