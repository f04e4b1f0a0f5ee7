//! Prompt templates for the hosted language model.

use minijinja::Environment;
use serde::Serialize;

use crate::task::ports::{SuggestionError, SuggestionResult};

const SUBTASKS_TEMPLATE_NAME: &str = "suggest_subtasks";
const DETAILED_STEPS_TEMPLATE_NAME: &str = "suggest_detailed_steps";

const SUBTASKS_TEMPLATE: &str = "\
You are a helpful task management assistant. Given a task description, suggest three \
subtasks that would help the user break down the task into smaller, manageable steps.

Task Description: {{ taskDescription }}

Subtasks:";

const DETAILED_STEPS_TEMPLATE: &str = "\
You are a helpful task breakdown assistant. Given a task title and description, generate \
3 to 5 detailed, actionable sub-steps to help the user complete the main task. Each step \
should be very concise, ideally 3-7 words, but clear enough to guide action. Focus on \
breaking the task into smaller, manageable actions.

Task Title: {{ taskTitle }}
Task Description: {{ taskDescription }}

Detailed Steps:";

/// Compiled prompt templates, keyed by suggestion operation.
#[derive(Debug)]
pub struct PromptTemplates {
    environment: Environment<'static>,
}

impl PromptTemplates {
    /// Compiles the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::Prompt`] when a template fails to parse.
    pub fn new() -> SuggestionResult<Self> {
        let mut environment = Environment::new();
        environment
            .add_template(SUBTASKS_TEMPLATE_NAME, SUBTASKS_TEMPLATE)
            .map_err(prompt_error)?;
        environment
            .add_template(DETAILED_STEPS_TEMPLATE_NAME, DETAILED_STEPS_TEMPLATE)
            .map_err(prompt_error)?;
        Ok(Self { environment })
    }

    /// Renders the subtask suggestion prompt.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::Prompt`] when rendering fails.
    pub fn render_subtasks(&self, context: &impl Serialize) -> SuggestionResult<String> {
        self.render(SUBTASKS_TEMPLATE_NAME, context)
    }

    /// Renders the detailed steps prompt.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::Prompt`] when rendering fails.
    pub fn render_detailed_steps(&self, context: &impl Serialize) -> SuggestionResult<String> {
        self.render(DETAILED_STEPS_TEMPLATE_NAME, context)
    }

    fn render(&self, name: &str, context: &impl Serialize) -> SuggestionResult<String> {
        self.environment
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(prompt_error)
    }
}

fn prompt_error(error: minijinja::Error) -> SuggestionError {
    SuggestionError::Prompt(error.to_string())
}
