//! Suggestion adapter selected by configuration.

use async_trait::async_trait;

use crate::config::{AiProvider, Config};
use crate::task::{
    adapters::gemini::GeminiSuggestionAdapter,
    ports::{
        DetailedSteps, DetailedStepsRequest, SubtaskSuggestionRequest, SubtaskSuggestions,
        SuggestionAdapter, SuggestionError, SuggestionResult,
    },
};

use super::CliError;

/// The adapter the CLI talks to.
#[derive(Debug)]
pub enum ConfiguredAdapter {
    /// Hosted model.
    Gemini(GeminiSuggestionAdapter),
    /// No network. New tasks get no suggestions and detailed steps are
    /// refused, so existing subtasks are never replaced.
    Offline,
}

impl ConfiguredAdapter {
    /// Builds the adapter named by `config.ai.provider`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] when the hosted provider has no API key
    /// and [`CliError::AdapterSetup`] when its HTTP client cannot be built.
    pub fn from_config(
        config: &Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        match config.ai.provider {
            AiProvider::Offline => {
                tracing::debug!("using offline suggestion adapter");
                Ok(Self::Offline)
            }
            AiProvider::Gemini => {
                let settings = config.gemini_settings(lookup)?;
                let adapter = GeminiSuggestionAdapter::new(settings)
                    .map_err(CliError::AdapterSetup)?;
                Ok(Self::Gemini(adapter))
            }
        }
    }
}

#[async_trait]
impl SuggestionAdapter for ConfiguredAdapter {
    async fn suggest_subtasks(
        &self,
        request: &SubtaskSuggestionRequest,
    ) -> SuggestionResult<SubtaskSuggestions> {
        match self {
            Self::Gemini(adapter) => adapter.suggest_subtasks(request).await,
            Self::Offline => Ok(SubtaskSuggestions::default()),
        }
    }

    async fn suggest_detailed_steps(
        &self,
        request: &DetailedStepsRequest,
    ) -> SuggestionResult<DetailedSteps> {
        match self {
            Self::Gemini(adapter) => adapter.suggest_detailed_steps(request).await,
            Self::Offline => {
                tracing::debug!(task = %request.task_title(), "detailed steps refused offline");
                Err(SuggestionError::Unavailable("offline mode".to_owned()))
            }
        }
    }
}
