//! Relevance scoring primitives.
//!
//! The ranker combines an embedding cosine similarity with deterministic
//! bonus terms for filter overlap. Bonuses are additive, so total scores
//! can exceed 1.0; the contract is the ordering, not a normalized score.

use serde::Serialize;

use crate::catalog::{AppliedFilters, CatalogItem};

/// Bonus weight for platform filter overlap.
pub const PLATFORM_BONUS_WEIGHT: f64 = 0.12;
/// Bonus weight for function filter overlap.
pub const FUNCTION_BONUS_WEIGHT: f64 = 0.12;

/// A catalog item paired with its relevance score. Lifetime is one
/// ranking call; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub item: CatalogItem,
    pub similarity_score: f64,
}

/// Cosine similarity of two embedding vectors: `dot(q,v) / (‖q‖·‖v‖)`.
/// Returns 0.0 for zero-length or zero-norm vectors.
pub fn cosine_similarity(query: &[f32], other: &[f32]) -> f64 {
    let len = query.len().min(other.len());
    if len == 0 {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut query_norm = 0.0f64;
    let mut other_norm = 0.0f64;
    for i in 0..len {
        let q = f64::from(query[i]);
        let v = f64::from(other[i]);
        dot += q * v;
        query_norm += q * q;
        other_norm += v * v;
    }

    let denominator = query_norm.sqrt() * other_norm.sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

/// Deterministic bonus for filter overlap: for each non-empty dimension
/// (platforms, functions), `overlap / |selected|` scaled by the dimension
/// weight. An item matching every selected token earns the full weight.
pub fn filter_bonus(item: &CatalogItem, filters: &AppliedFilters) -> f64 {
    let mut bonus = 0.0;

    if !filters.platforms.is_empty() {
        let overlap = item
            .supported_platforms
            .iter()
            .filter(|p| filters.platforms.contains(p))
            .count();
        bonus += overlap as f64 / filters.platforms.len().max(1) as f64 * PLATFORM_BONUS_WEIGHT;
    }

    if !filters.functions.is_empty() {
        let overlap = item
            .functions
            .iter()
            .filter(|f| filters.functions.contains(f))
            .count();
        bonus += overlap as f64 / filters.functions.len().max(1) as f64 * FUNCTION_BONUS_WEIGHT;
    }

    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Platform, ToolFunction};

    #[test]
    fn test_cosine_of_identical_vectors_is_one() {
        let v = vec![0.5f32, 1.0, -2.0];
        let score = cosine_similarity(&v, &v);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_of_orthogonal_vectors_is_zero() {
        let a = vec![1.0f32, 0.0];
        let b = vec![0.0f32, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_handles_zero_norm() {
        let a = vec![0.0f32, 0.0];
        let b = vec![1.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_full_platform_match_earns_exact_weight() {
        let mut filters = AppliedFilters::default();
        filters.platforms.insert(Platform::Ios);
        filters.platforms.insert(Platform::Windows);
        let item = CatalogItem {
            supported_platforms: vec![Platform::Ios, Platform::Windows, Platform::Macos],
            ..CatalogItem::default()
        };
        assert!((filter_bonus(&item, &filters) - PLATFORM_BONUS_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_no_overlap_earns_nothing() {
        let mut filters = AppliedFilters::default();
        filters.platforms.insert(Platform::Android);
        let item = CatalogItem {
            supported_platforms: vec![Platform::Ios],
            ..CatalogItem::default()
        };
        assert_eq!(filter_bonus(&item, &filters), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_proportional() {
        let mut filters = AppliedFilters::default();
        filters.platforms.insert(Platform::Ios);
        filters.platforms.insert(Platform::Windows);
        filters.functions.insert(ToolFunction::Vision);
        let item = CatalogItem {
            supported_platforms: vec![Platform::Ios],
            functions: vec![ToolFunction::Vision],
            ..CatalogItem::default()
        };
        let expected = 0.5 * PLATFORM_BONUS_WEIGHT + FUNCTION_BONUS_WEIGHT;
        assert!((filter_bonus(&item, &filters) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_filters_earn_nothing() {
        let item = CatalogItem {
            supported_platforms: vec![Platform::Ios],
            ..CatalogItem::default()
        };
        assert_eq!(filter_bonus(&item, &AppliedFilters::default()), 0.0);
    }
}
