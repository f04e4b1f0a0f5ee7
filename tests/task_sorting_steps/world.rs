//! Shared world state for task ordering scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskai::task::{
    adapters::memory::{InMemoryMirror, ScriptedSuggestionAdapter},
    domain::{Task, TaskDraft},
    services::{TASKS_STORAGE_KEY, TaskLifecycleService, TaskStore},
};

use crate::test_helpers::SteppingClock;

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryMirror, ScriptedSuggestionAdapter, SteppingClock>;

/// Scenario world for ordering behaviour tests.
pub struct SortingWorld {
    pub mirror: InMemoryMirror,
    pub service: TestTaskService,
}

impl SortingWorld {
    /// Creates a world with an empty task list.
    #[must_use]
    pub fn new() -> Self {
        let mirror = InMemoryMirror::new();
        let store = TaskStore::open(mirror.clone(), TASKS_STORAGE_KEY).into_value();
        let service = TaskLifecycleService::new(
            Arc::new(store),
            Arc::new(ScriptedSuggestionAdapter::new()),
            Arc::new(SteppingClock::default()),
        );
        Self { mirror, service }
    }

    /// Creates a task without subtasks from `draft`.
    pub fn create(&self, draft: TaskDraft) {
        let outcome = self
            .service
            .create_from_suggestions(draft, Vec::<String>::new());
        if let Some(warning) = outcome.warning {
            tracing::warn!(%warning, "scenario task was not saved");
        }
    }

    /// Returns the task with `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has that title.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        self.service
            .tasks()
            .into_iter()
            .find(|task| task.title().as_str() == title)
            .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))
    }
}

impl Default for SortingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SortingWorld {
    SortingWorld::default()
}

/// Titles of `tasks` in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
