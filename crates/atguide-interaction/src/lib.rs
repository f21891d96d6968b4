//! Outbound inference adapters for ATGuide.
//!
//! Implements the core `EmbeddingProvider` and `ReasoningProvider` traits
//! over a local Ollama-compatible HTTP service.

pub mod ollama_embedding;
pub mod ollama_reasoning;

pub use ollama_embedding::OllamaEmbeddingClient;
pub use ollama_reasoning::OllamaReasoningClient;
