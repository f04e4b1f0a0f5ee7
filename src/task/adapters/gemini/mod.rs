//! Hosted language model adapter for the Generative Language API.
//!
//! Each suggestion is one `generateContent` call whose reply is constrained
//! to a JSON response schema. There is no retry loop: a failed call is
//! reported to the caller as-is.

mod prompt;

pub use prompt::PromptTemplates;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;

use crate::task::ports::{
    DetailedSteps, DetailedStepsRequest, SubtaskSuggestionRequest, SubtaskSuggestions,
    SuggestionAdapter, SuggestionError, SuggestionResult,
};

/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for [`GeminiSuggestionAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiSettings {
    /// API base URL without a trailing slash.
    pub endpoint: String,
    /// Model name, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Optional whole-request timeout applied by the HTTP client.
    pub request_timeout: Option<Duration>,
}

impl GeminiSettings {
    /// Creates settings for the default endpoint and model.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: api_key.into(),
            request_timeout: None,
        }
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Suggestion adapter backed by a hosted Gemini model.
#[derive(Debug)]
pub struct GeminiSuggestionAdapter {
    client: Client,
    settings: GeminiSettings,
    templates: PromptTemplates,
}

impl GeminiSuggestionAdapter {
    /// Builds the adapter and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::Unavailable`] when the HTTP client cannot be
    /// constructed or [`SuggestionError::Prompt`] when the prompt templates
    /// fail to compile.
    pub fn new(settings: GeminiSettings) -> SuggestionResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SuggestionError::Unavailable(err.to_string()))?;
        Ok(Self {
            client,
            settings,
            templates: PromptTemplates::new()?,
        })
    }

    async fn generate<T: DeserializeOwned>(
        &self,
        prompt: String,
        response_schema: Value,
    ) -> SuggestionResult<T> {
        let body = GenerateContentRequest::new(prompt, response_schema);
        let url = self.settings.generate_content_url();
        tracing::debug!(model = %self.settings.model, "requesting suggestions");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "suggestion request failed");
                SuggestionError::Unavailable(err.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| SuggestionError::Unavailable(err.to_string()))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "suggestion service rejected request");
            return Err(SuggestionError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        decode_generate_content(&text)
    }
}

#[async_trait]
impl SuggestionAdapter for GeminiSuggestionAdapter {
    async fn suggest_subtasks(
        &self,
        request: &SubtaskSuggestionRequest,
    ) -> SuggestionResult<SubtaskSuggestions> {
        let prompt = self.templates.render_subtasks(request)?;
        self.generate(prompt, string_list_schema("subtasks")).await
    }

    async fn suggest_detailed_steps(
        &self,
        request: &DetailedStepsRequest,
    ) -> SuggestionResult<DetailedSteps> {
        let prompt = self.templates.render_detailed_steps(request)?;
        self.generate(prompt, string_list_schema("detailedSteps"))
            .await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn new(prompt: String, response_schema: Value) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_owned()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Object schema with a single required array-of-strings property.
fn string_list_schema(property: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            property: {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": [property]
    })
}

/// Extracts the structured payload from a `generateContent` reply body.
///
/// The model's JSON answer arrives as text inside the first candidate; all
/// text parts of that candidate are concatenated before decoding.
fn decode_generate_content<T: DeserializeOwned>(body: &str) -> SuggestionResult<T> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| SuggestionError::MalformedResponse(err.to_string()))?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(SuggestionError::MalformedResponse(
            "response contained no candidate text".to_owned(),
        ));
    }
    serde_json::from_str(&text).map_err(|err| SuggestionError::MalformedResponse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{GeminiSettings, decode_generate_content, string_list_schema};
    use crate::task::ports::{DetailedSteps, SubtaskSuggestions, SuggestionError};

    #[test]
    fn decodes_subtasks_from_candidate_text() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "{\"subtasks\": [\"Book hotel\", \"Pack bags\", \"Plan route\"]}"}]
                }
            }]
        }"#;

        let decoded: SubtaskSuggestions =
            decode_generate_content(body).expect("payload should decode");

        assert_eq!(decoded.subtasks, vec!["Book hotel", "Pack bags", "Plan route"]);
    }

    #[test]
    fn joins_split_text_parts_before_decoding() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"{\"detailedSteps\": [\"Pick"},
            {"text":" dates\"]}"}
        ]}}]}"#;

        let decoded: DetailedSteps = decode_generate_content(body).expect("payload should decode");

        assert_eq!(decoded.detailed_steps, vec!["Pick dates"]);
    }

    #[test]
    fn schema_violation_is_malformed() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"steps\": 3}"}]}}]}"#;
        let result: Result<SubtaskSuggestions, _> = decode_generate_content(body);
        assert!(matches!(result, Err(SuggestionError::MalformedResponse(_))));
    }

    #[test]
    fn empty_candidates_are_malformed() {
        let result: Result<SubtaskSuggestions, _> = decode_generate_content(r#"{"candidates":[]}"#);
        assert!(matches!(result, Err(SuggestionError::MalformedResponse(_))));
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let mut settings = GeminiSettings::new("key");
        settings.endpoint = "https://example.test/v1beta/".to_owned();
        settings.model = "gemini-test".to_owned();
        assert_eq!(
            settings.generate_content_url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn schema_requires_named_property() {
        let schema = string_list_schema("subtasks");
        assert_eq!(schema["required"][0], "subtasks");
        assert_eq!(schema["properties"]["subtasks"]["items"]["type"], "STRING");
    }
}
