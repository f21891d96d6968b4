//! Adapter traits for the external inference services.
//!
//! Both adapters are black boxes behind a single awaited call: the
//! embedding provider turns text into a vector, the reasoning provider
//! turns a fully-specified prompt into raw completion text. Neither
//! failure is fatal to a request; callers degrade locally.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Produces an embedding vector for a piece of text. One model identity
/// serves both queries and catalog text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Completes a natural-language prompt that embeds a strict JSON
/// response schema.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Locates the first `{ ... }` span in a raw completion and parses it as
/// JSON. Absence of a span or a parse failure yields the empty object,
/// never an error; the fallback decoding downstream fails open.
pub fn extract_json_object(raw: &str) -> Value {
    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if end > start {
            if let Ok(value) = serde_json::from_str::<Value>(&raw[start..=end]) {
                if value.is_object() {
                    return value;
                }
            }
        }
    }
    Value::Object(serde_json::Map::new())
}
