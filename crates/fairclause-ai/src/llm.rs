//! Reasoning-engine boundary.
//!
//! Everything above this module sees a single capability, [`TextGenerator`]:
//! one prompt in, one text out. [`GeminiClient`] implements it against the
//! Google Generative Language `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for answer generation and faithfulness checks.
pub const DEFAULT_ANSWER_MODEL: &str = "gemini-1.5-flash";
/// Model used for clause scoring and suggestions.
pub const DEFAULT_ASSESS_MODEL: &str = "gemini-2.5-flash";

/// A blocking-from-the-caller's-view call to a reasoning engine.
///
/// Implementations make exactly one outbound request per call and surface
/// failures as errors; retry policy belongs to callers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
            timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Read the key from [`API_KEY_ENV`].
    pub fn from_env(model: impl Into<String>) -> Result<Self, LlmError> {
        let key = std::env::var(API_KEY_ENV).unwrap_or_default();
        if key.trim().is_empty() {
            return Err(LlmError::MissingApiKey(API_KEY_ENV));
        }
        Ok(Self::new(key, model))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// HTTP client for Gemini `generateContent`.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Build a client. An empty API key is a configuration error.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey(API_KEY_ENV));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body<'a>(&self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: self.temperature.map(|temperature| GenerationConfig { temperature }),
        }
    }
}

/// Concatenate the text parts of the first candidate.
fn response_text(body: &str) -> Result<String, LlmError> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.endpoint_url();
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "gemini request");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(LlmError::Server {
                status: status.as_u16(),
                body,
            });
        }

        response_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(GeminiConfig::new("test-key", "gemini-2.5-flash").with_base_url(base_url))
            .unwrap()
    }

    #[test]
    fn empty_key_is_configuration_error() {
        let result = GeminiClient::new(GeminiConfig::new("  ", DEFAULT_ANSWER_MODEL));
        assert!(matches!(result, Err(LlmError::MissingApiKey(API_KEY_ENV))));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let c = client("http://localhost:8080/v1beta/");
        assert_eq!(
            c.endpoint_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let c = GeminiClient::new(
            GeminiConfig::new("k", DEFAULT_ASSESS_MODEL).with_temperature(0.0),
        )
        .unwrap();
        let json = serde_json::to_value(c.request_body("안녕")).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "안녕");
        assert_eq!(json["generationConfig"]["temperature"], 0.0);

        let plain = client("http://x");
        let json = serde_json::to_value(plain.request_body("q")).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "첫째 "}, {"text": "둘째"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        assert_eq!(response_text(body).unwrap(), "첫째 둘째");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        assert!(matches!(
            response_text(r#"{"candidates": []}"#),
            Err(LlmError::EmptyResponse)
        ));
        assert!(matches!(
            response_text(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#),
            Err(LlmError::EmptyResponse)
        ));
    }

    #[test]
    fn response_not_json() {
        assert!(matches!(response_text("<html>"), Err(LlmError::Json(_))));
    }
}
