//! Catalog domain models.
//!
//! Canonical token vocabularies for the four filter dimensions, the
//! read-only catalog item record, and the accumulated filter state that
//! the dialogue layer builds up and the filter engine consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::Display;

/// Canonical identifier for a device/OS family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Windows,
    Macos,
    Chromeos,
    Ipados,
    Ios,
    Android,
}

/// Canonical identifier for an accessibility need category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToolFunction {
    Reading,
    Cognitive,
    Vision,
    Physical,
    Hearing,
    Speech,
}

/// Whether a tool ships with the device or must be installed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum InstallType {
    BuiltIn,
    Installable,
}

/// How a tool can be purchased.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PurchaseOption {
    Free,
    FreeTrial,
    LifetimeLicense,
    Subscription,
}

/// A single tool record from the catalog source.
///
/// Canonical identity is `id`; `name` + `company` is a secondary key used
/// only by validation tooling. A missing field means the tool has no such
/// attribute, so every field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub company: String,
    pub description: String,
    pub vendor_product_page_url: String,
    pub functions: Vec<ToolFunction>,
    pub supported_platforms: Vec<Platform>,
    pub install_types: Vec<InstallType>,
    pub purchase_options: Vec<PurchaseOption>,
}

impl Default for CatalogItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            company: String::new(),
            description: String::new(),
            vendor_product_page_url: String::new(),
            functions: Vec::new(),
            supported_platforms: Vec::new(),
            install_types: Vec::new(),
            purchase_options: Vec::new(),
        }
    }
}

impl CatalogItem {
    /// Text used when embedding the item for relevance scoring.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.name, self.description)
    }
}

/// The filters accumulated over a conversation.
///
/// Each dimension is a set of canonical tokens. Dimensions are only ever
/// extended within a conversation, never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppliedFilters {
    pub platforms: BTreeSet<Platform>,
    pub functions: BTreeSet<ToolFunction>,
    pub install_types: BTreeSet<InstallType>,
    pub purchase_options: BTreeSet<PurchaseOption>,
}

impl AppliedFilters {
    /// True when no dimension has a selection.
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
            && self.functions.is_empty()
            && self.install_types.is_empty()
            && self.purchase_options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_wire_names() {
        assert_eq!(serde_json::to_string(&Platform::Ipados).unwrap(), "\"ipados\"");
        assert_eq!(
            serde_json::to_string(&InstallType::BuiltIn).unwrap(),
            "\"builtIn\""
        );
        assert_eq!(
            serde_json::to_string(&PurchaseOption::FreeTrial).unwrap(),
            "\"freeTrial\""
        );
        assert_eq!(
            serde_json::to_string(&ToolFunction::Speech).unwrap(),
            "\"speech\""
        );
    }

    #[test]
    fn test_catalog_item_defaults_missing_fields() {
        let item: CatalogItem =
            serde_json::from_str(r#"{"id": "tool-1", "name": "Magnifier"}"#).unwrap();
        assert_eq!(item.id, "tool-1");
        assert!(item.supported_platforms.is_empty());
        assert!(item.purchase_options.is_empty());
    }

    #[test]
    fn test_catalog_item_parses_wire_format() {
        let raw = r#"{
            "id": "tool-2",
            "name": "Reader",
            "company": "Acme",
            "description": "Reads text aloud",
            "vendorProductPageUrl": "https://example.com",
            "functions": ["reading", "vision"],
            "supportedPlatforms": ["ios", "macos"],
            "installTypes": ["builtIn"],
            "purchaseOptions": ["free", "subscription"]
        }"#;
        let item: CatalogItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.functions, vec![ToolFunction::Reading, ToolFunction::Vision]);
        assert_eq!(item.supported_platforms, vec![Platform::Ios, Platform::Macos]);
        assert_eq!(item.install_types, vec![InstallType::BuiltIn]);
        assert_eq!(item.vendor_product_page_url, "https://example.com");
    }

    #[test]
    fn test_applied_filters_wire_names() {
        let mut filters = AppliedFilters::default();
        filters.install_types.insert(InstallType::Installable);
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["installTypes"][0], "installable");
        assert!(json["purchaseOptions"].as_array().unwrap().is_empty());
    }
}
