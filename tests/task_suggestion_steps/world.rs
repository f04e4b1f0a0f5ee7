//! Shared world state for suggestion-driven task scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskai::task::{
    adapters::memory::{InMemoryMirror, ScriptedSuggestionAdapter},
    domain::Task,
    ports::SuggestionKind,
    services::{
        StoreWarning, SuggestionReview, TASKS_STORAGE_KEY, TaskLifecycleError,
        TaskLifecycleService, TaskStore,
    },
};

use crate::test_helpers::SteppingClock;

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryMirror, ScriptedSuggestionAdapter, SteppingClock>;

/// Scenario world for suggestion behaviour tests.
pub struct SuggestionWorld {
    pub mirror: InMemoryMirror,
    pub adapter: ScriptedSuggestionAdapter,
    pub service: TestTaskService,
    pub review: Option<SuggestionReview>,
    pub last_error: Option<(SuggestionKind, TaskLifecycleError)>,
    pub warnings: Vec<StoreWarning>,
}

impl SuggestionWorld {
    /// Creates a world over an empty mirror and an unscripted adapter.
    #[must_use]
    pub fn new() -> Self {
        let mirror = InMemoryMirror::new();
        let adapter = ScriptedSuggestionAdapter::new();
        let store = TaskStore::open(mirror.clone(), TASKS_STORAGE_KEY).into_value();
        let service = TaskLifecycleService::new(
            Arc::new(store),
            Arc::new(adapter.clone()),
            Arc::new(SteppingClock::default()),
        );

        Self {
            mirror,
            adapter,
            service,
            review: None,
            last_error: None,
            warnings: Vec::new(),
        }
    }

    /// Records a persistence warning, if any.
    pub fn note(&mut self, warning: Option<StoreWarning>) {
        self.warnings.extend(warning);
    }

    /// Returns the first task in stored order.
    ///
    /// # Errors
    ///
    /// Returns an error when the task list is empty.
    pub fn newest_task(&self) -> Result<Task, eyre::Report> {
        self.service
            .tasks()
            .first()
            .cloned()
            .ok_or_else(|| eyre::eyre!("task list is empty"))
    }
}

impl Default for SuggestionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SuggestionWorld {
    SuggestionWorld::default()
}
