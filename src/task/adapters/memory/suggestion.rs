//! Scripted suggestion adapter for tests and demos.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::task::ports::{
    DetailedSteps, DetailedStepsRequest, SubtaskSuggestionRequest, SubtaskSuggestions,
    SuggestionAdapter, SuggestionError, SuggestionResult,
};

/// Adapter that replays queued results in order.
///
/// Once a queue is exhausted, calls succeed with an empty list.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSuggestionAdapter {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug, Default)]
struct ScriptState {
    subtasks: VecDeque<SuggestionResult<SubtaskSuggestions>>,
    detailed_steps: VecDeque<SuggestionResult<DetailedSteps>>,
    subtask_requests: Vec<SubtaskSuggestionRequest>,
    detailed_steps_requests: Vec<DetailedStepsRequest>,
}

impl ScriptedSuggestionAdapter {
    /// Creates an adapter with empty scripts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful subtask suggestion reply.
    #[must_use]
    pub fn with_subtasks<I, S>(self, subtasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_subtasks(Ok(SubtaskSuggestions {
            subtasks: subtasks.into_iter().map(Into::into).collect(),
        }));
        self
    }

    /// Queues a failing subtask suggestion reply.
    #[must_use]
    pub fn with_subtask_error(self, error: SuggestionError) -> Self {
        self.push_subtasks(Err(error));
        self
    }

    /// Queues a successful detailed steps reply.
    #[must_use]
    pub fn with_detailed_steps<I, S>(self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_detailed_steps(Ok(DetailedSteps {
            detailed_steps: steps.into_iter().map(Into::into).collect(),
        }));
        self
    }

    /// Queues a failing detailed steps reply.
    #[must_use]
    pub fn with_detailed_steps_error(self, error: SuggestionError) -> Self {
        self.push_detailed_steps(Err(error));
        self
    }

    /// Appends a subtask suggestion reply to the script.
    pub fn push_subtasks(&self, result: SuggestionResult<SubtaskSuggestions>) {
        self.with_state(|state| state.subtasks.push_back(result));
    }

    /// Appends a detailed steps reply to the script.
    pub fn push_detailed_steps(&self, result: SuggestionResult<DetailedSteps>) {
        self.with_state(|state| state.detailed_steps.push_back(result));
    }

    /// Returns every subtask suggestion request received so far.
    #[must_use]
    pub fn subtask_requests(&self) -> Vec<SubtaskSuggestionRequest> {
        self.with_state(|state| state.subtask_requests.clone())
    }

    /// Returns every detailed steps request received so far.
    #[must_use]
    pub fn detailed_steps_requests(&self) -> Vec<DetailedStepsRequest> {
        self.with_state(|state| state.detailed_steps_requests.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut ScriptState) -> T) -> T {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut state)
    }
}

#[async_trait]
impl SuggestionAdapter for ScriptedSuggestionAdapter {
    async fn suggest_subtasks(
        &self,
        request: &SubtaskSuggestionRequest,
    ) -> SuggestionResult<SubtaskSuggestions> {
        self.with_state(|state| {
            state.subtask_requests.push(request.clone());
            state.subtasks.pop_front().unwrap_or_else(|| Ok(SubtaskSuggestions::default()))
        })
    }

    async fn suggest_detailed_steps(
        &self,
        request: &DetailedStepsRequest,
    ) -> SuggestionResult<DetailedSteps> {
        self.with_state(|state| {
            state.detailed_steps_requests.push(request.clone());
            state
                .detailed_steps
                .pop_front()
                .unwrap_or_else(|| Ok(DetailedSteps::default()))
        })
    }
}
