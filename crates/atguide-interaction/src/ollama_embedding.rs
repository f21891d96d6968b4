//! OllamaEmbeddingClient - embedding adapter over the Ollama REST API.
//!
//! Calls `POST /api/embeddings` with a single prompt per request. The
//! same model identity embeds both queries and catalog text.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use atguide_core::config::InferenceConfig;
use atguide_core::error::{AtguideError, Result};
use atguide_core::inference::EmbeddingProvider;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Embedding provider backed by a local Ollama service.
#[derive(Debug, Clone)]
pub struct OllamaEmbeddingClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaEmbeddingClient {
    /// Creates a client for the given service URL and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Creates a client with defaults (`http://localhost:11434`,
    /// `nomic-embed-text`).
    pub fn local_default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_EMBEDDING_MODEL)
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
            model: config.embedding_model.clone(),
        })
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embeddings", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingsRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|err| AtguideError::adapter(format!("embedding request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AtguideError::adapter(format!(
                "embedding request returned {status}: {body}"
            )));
        }

        let parsed: EmbeddingsResponse = response.json().await.map_err(|err| {
            AtguideError::adapter(format!("failed to parse embedding response: {err}"))
        })?;

        if parsed.embedding.is_empty() {
            return Err(AtguideError::adapter("embedding response contained no vector"));
        }

        Ok(parsed.embedding)
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        let client = OllamaEmbeddingClient::new("http://localhost:11434/", "nomic-embed-text");
        assert_eq!(client.endpoint(), "http://localhost:11434/api/embeddings");
    }

    #[test]
    fn test_with_model_overrides() {
        let client = OllamaEmbeddingClient::local_default().with_model("all-minilm");
        assert_eq!(client.model, "all-minilm");
    }
}
