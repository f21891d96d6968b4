//! Relevance ranking service.
//!
//! Applies the structural catalog filter and then orders the survivors by
//! semantic relevance to the user's query. Ranking is total over the
//! filtered set: an item whose embedding call fails scores 0.0 instead of
//! being dropped, and a failed query embedding degrades the whole call to
//! a no-op ordering.

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use atguide_core::catalog::{
    AppliedFilters, CatalogItem, CatalogRepository, VisibleSubset, filter_catalog,
};
use atguide_core::inference::EmbeddingProvider;
use atguide_core::ranking::{RankedResult, cosine_similarity, filter_bonus};

use crate::response::{RankedTool, SortRequest, SortResponse};

/// Ranks filtered catalog items against a free-text query.
pub struct RankingService {
    embedding: Arc<dyn EmbeddingProvider>,
    catalog: Arc<dyn CatalogRepository>,
}

impl RankingService {
    pub fn new(embedding: Arc<dyn EmbeddingProvider>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { embedding, catalog }
    }

    /// Handles a sorting request end to end: visible-subset restriction,
    /// structural filtering, then relevance ranking. Returns an explicit
    /// empty result when there is no query or nothing survives the
    /// filters.
    pub async fn rank_tools(&self, request: &SortRequest) -> SortResponse {
        let items = match self.catalog.load_all().await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "catalog unavailable for sorting");
                return SortResponse::empty(err.to_string());
            }
        };

        let visible = VisibleSubset::from_lists(&request.visible_tools, &request.visible_ids);
        let filtered = filter_catalog(items, &request.filters, Some(&visible));

        if filtered.is_empty() || request.query.trim().is_empty() {
            return SortResponse::empty("No tools to sort or no query provided");
        }

        let ranked = self.rank(&request.query, filtered, &request.filters).await;
        SortResponse {
            tools: ranked.into_iter().map(|r| RankedTool::from(r.item)).collect(),
            success: true,
            sorted: true,
            error: None,
        }
    }

    /// Scores and orders `items` by cosine similarity to `query` plus the
    /// deterministic filter bonuses. Descending by score; ties keep the
    /// original catalog order.
    pub async fn rank(
        &self,
        query: &str,
        items: Vec<CatalogItem>,
        filters: &AppliedFilters,
    ) -> Vec<RankedResult> {
        if items.is_empty() || query.is_empty() {
            return Vec::new();
        }

        let query_vector = match self.embedding.embed(query).await {
            Ok(vector) => vector,
            Err(err) => {
                // Systemic failure: degrade to a no-op ordering instead
                // of failing the request.
                warn!(error = %err, "query embedding failed, returning unscored items");
                return items
                    .into_iter()
                    .map(|item| RankedResult {
                        item,
                        similarity_score: 0.0,
                    })
                    .collect();
            }
        };

        let mut scored = Vec::with_capacity(items.len());
        for item in items {
            let similarity_score = match self.embedding.embed(&item.embedding_text()).await {
                Ok(vector) => {
                    cosine_similarity(&query_vector, &vector) + filter_bonus(&item, filters)
                }
                Err(err) => {
                    warn!(item = %item.name, error = %err, "item embedding failed, scoring 0.0");
                    0.0
                }
            };
            scored.push(RankedResult {
                item,
                similarity_score,
            });
        }

        // Stable sort: equal scores preserve catalog order.
        scored.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(Ordering::Equal)
        });

        debug!(count = scored.len(), "ranking complete");
        scored
    }
}
