//! Gemini REST client
//!
//! Thin wrapper over the `generateContent` endpoint of the Google
//! generative-language API. The API is a black box to the rest of the
//! system: callers hand over a prompt string and get text (or JSON-shaped
//! text in structured-output mode) back.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::utils::{ApiError, ApiResult};

/// Generation capability seam.
///
/// The orchestrator only depends on this trait, so tests can substitute a
/// recording stub without any network or environment setup.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate free text for a prompt.
    async fn generate(&self, prompt: &str) -> ApiResult<String>;

    /// Generate with structured-output mode and parse the result as JSON.
    async fn generate_structured(&self, prompt: &str) -> ApiResult<Value>;
}

pub struct GeminiClient {
    http_client: Client,
    api_base: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
        }
    }

    /// Override the API base URL (proxies, test servers).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    // Gemini authenticates with the key as a query parameter
    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent?key={}", self.api_base, self.model, self.api_key)
    }

    async fn generate_content(&self, prompt: &str, json_mode: bool) -> ApiResult<String> {
        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = self.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if json_mode {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        tracing::debug!("Gemini request: model={} json_mode={}", self.model, json_mode);

        let response = self.http_client.post(self.endpoint()).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: HTTP {}: {}", status, text);
            return Err(ApiError::upstream(format!("Gemini API error: HTTP {}: {}", status, text)));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed.into_text()
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> ApiResult<String> {
        self.generate_content(prompt, false).await
    }

    async fn generate_structured(&self, prompt: &str) -> ApiResult<Value> {
        let text = self.generate_content(prompt, true).await?;
        let value = serde_json::from_str(&text)?;
        Ok(value)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Extract the text of the first candidate, concatenating its parts.
    fn into_text(self) -> ApiResult<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::upstream("Gemini API returned no candidates"))?;

        let content = candidate
            .content
            .ok_or_else(|| ApiError::upstream("Gemini API returned a candidate without content"))?;

        Ok(content.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
    }
}
