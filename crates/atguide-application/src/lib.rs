//! Application layer for ATGuide.
//!
//! Provides the two operations of the conversation API surface —
//! advancing the guided dialogue and ranking the filtered catalog — by
//! coordinating the domain, interaction, and infrastructure layers.

pub mod dialogue;
pub mod ranking_service;
pub mod response;

pub use dialogue::DialogueService;
pub use ranking_service::RankingService;
pub use response::{RankedTool, SortRequest, SortResponse, TurnResponse};

use std::sync::Arc;

use atguide_core::catalog::CatalogRepository;
use atguide_core::config::AppConfig;
use atguide_core::error::Result;
use atguide_core::inference::{EmbeddingProvider, ReasoningProvider};
use atguide_infrastructure::JsonCatalogRepository;
use atguide_interaction::{OllamaEmbeddingClient, OllamaReasoningClient};

/// Builds the default wiring: JSON catalog repository plus Ollama-backed
/// embedding and reasoning adapters, all configured from `config`.
pub fn build_services(config: &AppConfig) -> Result<(DialogueService, RankingService)> {
    let catalog: Arc<dyn CatalogRepository> =
        Arc::new(JsonCatalogRepository::new(config.catalog_path.clone()));
    let embedding: Arc<dyn EmbeddingProvider> =
        Arc::new(OllamaEmbeddingClient::from_config(&config.inference)?);
    let reasoning: Arc<dyn ReasoningProvider> =
        Arc::new(OllamaReasoningClient::from_config(&config.inference)?);

    Ok((
        DialogueService::new(reasoning, Arc::clone(&catalog)),
        RankingService::new(embedding, catalog),
    ))
}
