//! Structural catalog filtering.
//!
//! Filtering is OR within a dimension and AND across dimensions: an item
//! survives a dimension when it shares at least one token with the
//! selection for that dimension, and dimensions with no selection impose
//! no constraint. An optional visible subset restricts the candidate set
//! first, modeling "only re-rank what the caller currently has on screen".

use std::collections::BTreeSet;
use std::collections::HashSet;

use super::model::{AppliedFilters, CatalogItem};

/// The set of tools currently visible to the caller, keyed by lowercased
/// name or lowercased id. When both are supplied, names take precedence.
#[derive(Debug, Clone, Default)]
pub struct VisibleSubset {
    names: HashSet<String>,
    ids: HashSet<String>,
}

impl VisibleSubset {
    /// Builds a subset from raw name and id lists, trimming and
    /// lowercasing each entry and skipping blanks.
    pub fn from_lists(names: &[String], ids: &[String]) -> Self {
        Self {
            names: normalize(names),
            ids: normalize(ids),
        }
    }

    /// True when neither names nor ids were supplied.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.ids.is_empty()
    }

    fn contains(&self, item: &CatalogItem) -> bool {
        if !self.names.is_empty() {
            self.names.contains(&item.name.to_lowercase())
        } else {
            self.ids.contains(&item.id.to_lowercase())
        }
    }
}

fn normalize(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Applies the visible-subset restriction and then each non-empty filter
/// dimension to `items`, preserving catalog order.
pub fn filter_catalog(
    items: Vec<CatalogItem>,
    filters: &AppliedFilters,
    visible: Option<&VisibleSubset>,
) -> Vec<CatalogItem> {
    let mut result = items;

    if let Some(subset) = visible {
        if !subset.is_empty() {
            result.retain(|item| subset.contains(item));
        }
    }

    if !filters.is_empty() {
        result.retain(|item| {
            dimension_matches(&item.functions, &filters.functions)
                && dimension_matches(&item.supported_platforms, &filters.platforms)
                && dimension_matches(&item.install_types, &filters.install_types)
                && dimension_matches(&item.purchase_options, &filters.purchase_options)
        });
    }

    result
}

/// True when the dimension has no selection, or the item carries at least
/// one selected token. An item with no tokens for the dimension never
/// matches a non-empty selection.
fn dimension_matches<T: Ord>(item_tokens: &[T], selected: &BTreeSet<T>) -> bool {
    selected.is_empty() || item_tokens.iter().any(|t| selected.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{InstallType, Platform, ToolFunction};

    fn item(id: &str, platforms: &[Platform], functions: &[ToolFunction]) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Tool {id}"),
            supported_platforms: platforms.to_vec(),
            functions: functions.to_vec(),
            ..CatalogItem::default()
        }
    }

    fn sample() -> Vec<CatalogItem> {
        vec![
            item("a", &[Platform::Ios], &[ToolFunction::Vision]),
            item("b", &[Platform::Windows], &[ToolFunction::Reading]),
            item("c", &[Platform::Ios, Platform::Windows], &[ToolFunction::Hearing]),
            item("d", &[], &[ToolFunction::Vision]),
        ]
    }

    #[test]
    fn test_empty_filters_impose_no_constraint() {
        let filtered = filter_catalog(sample(), &AppliedFilters::default(), None);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn test_or_within_dimension() {
        let mut filters = AppliedFilters::default();
        filters.platforms.insert(Platform::Ios);
        filters.platforms.insert(Platform::Windows);
        let filtered = filter_catalog(sample(), &filters, None);
        let ids: Vec<_> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_and_across_dimensions() {
        let mut filters = AppliedFilters::default();
        filters.platforms.insert(Platform::Ios);
        filters.functions.insert(ToolFunction::Hearing);
        let filtered = filter_catalog(sample(), &filters, None);
        let ids: Vec<_> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn test_missing_attribute_never_matches() {
        let mut filters = AppliedFilters::default();
        filters.platforms.insert(Platform::Ios);
        let filtered = filter_catalog(sample(), &filters, None);
        assert!(filtered.iter().all(|i| i.id != "d"));

        let mut install = AppliedFilters::default();
        install.install_types.insert(InstallType::BuiltIn);
        let filtered = filter_catalog(sample(), &install, None);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filtering_is_monotonic_and_idempotent() {
        let mut filters = AppliedFilters::default();
        filters.functions.insert(ToolFunction::Vision);
        let all = sample();
        let once = filter_catalog(all.clone(), &filters, None);
        assert!(once.len() <= all.len());
        let twice = filter_catalog(once.clone(), &filters, None);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_visible_subset_by_name_case_insensitive() {
        let visible = VisibleSubset::from_lists(&["  TOOL A ".to_string()], &[]);
        let filtered = filter_catalog(sample(), &AppliedFilters::default(), Some(&visible));
        let ids: Vec<_> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_visible_subset_names_take_precedence_over_ids() {
        let visible = VisibleSubset::from_lists(&["Tool a".to_string()], &["b".to_string()]);
        let filtered = filter_catalog(sample(), &AppliedFilters::default(), Some(&visible));
        let ids: Vec<_> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_visible_subset_by_id_when_no_names() {
        let visible = VisibleSubset::from_lists(&[], &["C".to_string(), "d".to_string()]);
        let filtered = filter_catalog(sample(), &AppliedFilters::default(), Some(&visible));
        let ids: Vec<_> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d"]);
    }
}
