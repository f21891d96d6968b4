//! Application configuration structs.
//!
//! Loaded from `~/.config/atguide/config.toml` by the infrastructure
//! layer; every field has a default so a missing or partial file works.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the catalog JSON file, read fresh on every filter call.
    pub catalog_path: PathBuf,
    /// Settings for the local inference service.
    pub inference: InferenceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("public/data/catalog.json"),
            inference: InferenceConfig::default(),
        }
    }
}

/// Settings for the Ollama-compatible inference service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL of the service.
    pub base_url: String,
    /// Model used for query and catalog text embeddings.
    pub embedding_model: String,
    /// Model used for the dialogue fallback analysis.
    pub reasoning_model: String,
    /// Per-request timeout; a timeout is treated as an adapter failure.
    pub request_timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            reasoning_model: "gemma2:9b".to_string(),
            request_timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.inference.base_url, "http://localhost:11434");
        assert_eq!(config.inference.embedding_model, "nomic-embed-text");
        assert_eq!(config.inference.reasoning_model, "gemma2:9b");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            catalog_path = "/srv/catalog.json"

            [inference]
            reasoning_model = "llama3:8b"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.inference.reasoning_model, "llama3:8b");
        assert_eq!(config.inference.embedding_model, "nomic-embed-text");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
