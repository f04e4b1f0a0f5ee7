//! Service layer for task creation, updates and AI-assisted breakdown.
//!
//! Every mutation goes through the [`TaskStore`] and is written through to
//! the durable mirror before the call returns. Suggestion calls are the only
//! awaits, and the store lock is never held across them.

use mockable::Clock;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use super::{
    review::SuggestionReview,
    store::{StoreOutcome, TaskStore},
};
use crate::task::{
    domain::{
        SubtaskId, Task, TaskDomainError, TaskDraft, TaskId, TaskOrdering, TaskStatus, sort_tasks,
    },
    ports::{
        DetailedStepsRequest, DurableMirror, SubtaskSuggestionRequest, SuggestionAdapter,
        SuggestionError,
    },
};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Form validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The suggestion adapter failed.
    #[error(transparent)]
    Suggestion(#[from] SuggestionError),
    /// No task exists with the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// A detailed-steps request for the task has not resolved yet.
    #[error("detailed steps are already being generated for task {0}")]
    StepsAlreadyPending(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<M, A, C>
where
    M: DurableMirror,
    A: SuggestionAdapter,
    C: Clock + Send + Sync,
{
    store: Arc<TaskStore<M>>,
    adapter: Arc<A>,
    clock: Arc<C>,
    pending_steps: Arc<Mutex<HashSet<TaskId>>>,
}

impl<M, A, C> Clone for TaskLifecycleService<M, A, C>
where
    M: DurableMirror,
    A: SuggestionAdapter,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            adapter: Arc::clone(&self.adapter),
            clock: Arc::clone(&self.clock),
            pending_steps: Arc::clone(&self.pending_steps),
        }
    }
}

impl<M, A, C> TaskLifecycleService<M, A, C>
where
    M: DurableMirror,
    A: SuggestionAdapter,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub fn new(store: Arc<TaskStore<M>>, adapter: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            store,
            adapter,
            clock,
            pending_steps: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Returns the tasks in stored order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.store.snapshot()
    }

    /// Returns the task with the given identifier, if present.
    #[must_use]
    pub fn find_task(&self, task_id: TaskId) -> Option<Task> {
        self.store
            .read(|tasks| tasks.iter().find(|task| task.id() == task_id).cloned())
    }

    /// Returns whether a detailed-steps request for the task is in flight.
    #[must_use]
    pub fn is_generating_steps(&self, task_id: TaskId) -> bool {
        self.pending_steps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&task_id)
    }

    /// Asks the adapter for subtask suggestions for a submitted draft.
    ///
    /// Nothing is stored; the returned review must be confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Suggestion`] when the adapter fails. No
    /// task is created in that case.
    pub async fn request_suggestions(
        &self,
        draft: &TaskDraft,
    ) -> TaskLifecycleResult<SuggestionReview> {
        let request = SubtaskSuggestionRequest::from_draft(draft);
        let suggestions = self
            .adapter
            .suggest_subtasks(&request)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "subtask suggestion failed"))?;
        tracing::debug!(
            count = suggestions.subtasks.len(),
            "received subtask suggestions"
        );
        Ok(SuggestionReview::new(draft.clone(), suggestions.subtasks))
    }

    /// Creates a task from a confirmed review.
    pub fn confirm_review(&self, review: SuggestionReview) -> StoreOutcome<Task> {
        let (draft, selected) = review.into_selection();
        self.create_from_suggestions(draft, selected)
    }

    /// Creates a `ToDo` task with one subtask per selected suggestion.
    ///
    /// The task is prepended and the collection re-sorted newest first.
    pub fn create_from_suggestions<I, S>(&self, draft: TaskDraft, selected: I) -> StoreOutcome<Task>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let task = Task::from_draft(draft, selected, &*self.clock);
        let created = task.clone();
        tracing::debug!(task_id = %created.id(), subtasks = created.subtasks().len(), "creating task");
        self.store
            .mutate(move |tasks| {
                tasks.insert(0, task);
                sort_tasks(tasks, TaskOrdering::NEWEST_FIRST);
                ((), true)
            })
            .map(|()| created)
    }

    /// Replaces a task's status.
    ///
    /// Returns `None` and leaves storage untouched when the task is absent.
    pub fn update_status(&self, task_id: TaskId, status: TaskStatus) -> StoreOutcome<Option<Task>> {
        self.update_task(task_id, |task| {
            task.set_status(status);
            true
        })
    }

    /// Flips completion of one subtask.
    ///
    /// Returns `None` and leaves storage untouched when either identifier is
    /// absent.
    pub fn toggle_subtask(
        &self,
        task_id: TaskId,
        subtask_id: SubtaskId,
    ) -> StoreOutcome<Option<Task>> {
        self.update_task(task_id, |task| task.toggle_subtask(subtask_id))
    }

    /// Removes a task permanently.
    ///
    /// Returns `false` when no task had the identifier; repeating a delete is
    /// therefore harmless.
    pub fn delete_task(&self, task_id: TaskId) -> StoreOutcome<bool> {
        self.store.mutate(|tasks| {
            let before = tasks.len();
            tasks.retain(|task| task.id() != task_id);
            let removed = tasks.len() != before;
            if removed {
                tracing::debug!(%task_id, "deleted task");
            } else {
                tracing::debug!(%task_id, "delete ignored; task not found");
            }
            (removed, removed)
        })
    }

    /// Re-orders the stored collection.
    pub fn sort_tasks(&self, ordering: TaskOrdering) -> StoreOutcome<()> {
        self.store.mutate(|tasks| {
            sort_tasks(tasks, ordering);
            ((), true)
        })
    }

    /// Replaces a task's subtasks with AI-generated detailed steps.
    ///
    /// Existing subtasks and their completion state are discarded. Only one
    /// request per task may be in flight; other tasks are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is absent
    /// before the call or was deleted while it was pending,
    /// [`TaskLifecycleError::StepsAlreadyPending`] when a request for the
    /// same task is unresolved, and [`TaskLifecycleError::Suggestion`] when
    /// the adapter fails. The task is unchanged on every error.
    pub async fn request_detailed_steps(
        &self,
        task_id: TaskId,
    ) -> TaskLifecycleResult<StoreOutcome<Task>> {
        let task = self
            .find_task(task_id)
            .ok_or(TaskLifecycleError::NotFound(task_id))?;
        let _pending = PendingSteps::claim(&self.pending_steps, task_id)
            .ok_or(TaskLifecycleError::StepsAlreadyPending(task_id))?;

        let request = DetailedStepsRequest::from_task(&task);
        let steps = self
            .adapter
            .suggest_detailed_steps(&request)
            .await
            .inspect_err(|err| tracing::warn!(%task_id, error = %err, "detailed steps failed"))?;

        let StoreOutcome { value, warning } = self.update_task(task_id, |stored| {
            stored.replace_subtasks(steps.detailed_steps);
            true
        });
        let updated = value.ok_or_else(|| {
            tracing::debug!(%task_id, "task deleted while steps were pending");
            TaskLifecycleError::NotFound(task_id)
        })?;
        Ok(StoreOutcome {
            value: updated,
            warning,
        })
    }

    fn update_task(
        &self,
        task_id: TaskId,
        change: impl FnOnce(&mut Task) -> bool,
    ) -> StoreOutcome<Option<Task>> {
        self.store.mutate(|tasks| {
            let Some(task) = tasks.iter_mut().find(|task| task.id() == task_id) else {
                tracing::debug!(%task_id, "update ignored; task not found");
                return (None, false);
            };
            if change(task) {
                (Some(task.clone()), true)
            } else {
                tracing::debug!(%task_id, "update ignored; nothing changed");
                (None, false)
            }
        })
    }
}

/// Marks a task as having a detailed-steps request in flight until dropped.
struct PendingSteps {
    pending: Arc<Mutex<HashSet<TaskId>>>,
    task_id: TaskId,
}

impl PendingSteps {
    fn claim(pending: &Arc<Mutex<HashSet<TaskId>>>, task_id: TaskId) -> Option<Self> {
        let inserted = pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(task_id);
        inserted.then(|| Self {
            pending: Arc::clone(pending),
            task_id,
        })
    }
}

impl Drop for PendingSteps {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.task_id);
    }
}
