//! OllamaReasoningClient - text-completion adapter over the Ollama REST
//! API.
//!
//! Calls `POST /api/generate` with streaming disabled and returns the raw
//! completion text. Callers locate and parse the JSON span themselves
//! (see `atguide_core::inference::extract_json_object`), so a model that
//! wraps its answer in prose still works.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use atguide_core::config::InferenceConfig;
use atguide_core::error::{AtguideError, Result};
use atguide_core::inference::ReasoningProvider;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_REASONING_MODEL: &str = "gemma2:9b";

/// Reasoning provider backed by a local Ollama service.
#[derive(Debug, Clone)]
pub struct OllamaReasoningClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaReasoningClient {
    /// Creates a client for the given service URL and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Creates a client with defaults (`http://localhost:11434`,
    /// `gemma2:9b`).
    pub fn local_default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_REASONING_MODEL)
    }

    /// Builds a client from the inference configuration, applying the
    /// configured request timeout.
    pub fn from_config(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| AtguideError::adapter(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.reasoning_model.clone(),
        })
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ReasoningProvider for OllamaReasoningClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(prompt_chars = prompt.len(), model = %self.model, "reasoning request");

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|err| AtguideError::adapter(format!("reasoning request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AtguideError::adapter(format!(
                "reasoning request returned {status}: {body}"
            )));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|err| {
            AtguideError::adapter(format!("failed to parse reasoning response: {err}"))
        })?;

        Ok(parsed.response)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}
