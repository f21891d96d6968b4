//! Request and response DTOs for the conversation API surface.

use serde::{Deserialize, Serialize};

use atguide_core::catalog::{
    AppliedFilters, CatalogItem, InstallType, Platform, PurchaseOption, ToolFunction,
};
use atguide_core::conversation::ConversationState;

use crate::dialogue::messages;

/// Result of one conversation turn. The caller persists `state` and sends
/// it back verbatim on the next turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub bot_message: String,
    pub state: ConversationState,
    pub success: bool,
    #[serde(default)]
    pub show_interface: bool,
    #[serde(default)]
    pub request_sorting: bool,
}

impl TurnResponse {
    /// The structured failure response the transport boundary returns for
    /// malformed input or an unexpected processing fault.
    pub fn failure(state: ConversationState) -> Self {
        Self {
            bot_message: messages::error_restart().to_string(),
            state,
            success: false,
            show_interface: false,
            request_sorting: false,
        }
    }
}

/// A request to re-rank the (possibly filtered, possibly visible-subset
/// restricted) catalog against a free-text query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortRequest {
    pub query: String,
    pub filters: AppliedFilters,
    pub visible_tools: Vec<String>,
    pub visible_ids: Vec<String>,
}

/// A formatted tool record as consumed by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTool {
    pub id: String,
    pub tool_name: String,
    pub company: String,
    pub description: String,
    pub website_url: String,
    pub functions: Vec<ToolFunction>,
    #[serde(rename = "supportedPlatforms")]
    pub supported_platforms: Vec<Platform>,
    #[serde(rename = "installTypes")]
    pub install_types: Vec<InstallType>,
    #[serde(rename = "purchaseOptions")]
    pub purchase_options: Vec<PurchaseOption>,
}

impl From<CatalogItem> for RankedTool {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            tool_name: fallback(item.name, "Unknown Tool"),
            company: fallback(item.company, "Unknown Company"),
            description: fallback(item.description, "No description available"),
            website_url: item.vendor_product_page_url,
            functions: item.functions,
            supported_platforms: item.supported_platforms,
            install_types: item.install_types,
            purchase_options: item.purchase_options,
        }
    }
}

fn fallback(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Result of a ranking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortResponse {
    pub tools: Vec<RankedTool>,
    pub success: bool,
    pub sorted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SortResponse {
    /// The explicit empty result used when there is no query or nothing
    /// to sort; not an error in the transport sense.
    pub fn empty(reason: impl Into<String>) -> Self {
        Self {
            tools: Vec::new(),
            success: false,
            sorted: false,
            error: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_tool_fallbacks() {
        let tool = RankedTool::from(CatalogItem {
            id: "x".to_string(),
            ..CatalogItem::default()
        });
        assert_eq!(tool.tool_name, "Unknown Tool");
        assert_eq!(tool.company, "Unknown Company");
        assert_eq!(tool.description, "No description available");
    }

    #[test]
    fn test_ranked_tool_wire_names() {
        let tool = RankedTool::from(CatalogItem {
            id: "x".to_string(),
            name: "Reader".to_string(),
            supported_platforms: vec![Platform::Ios],
            ..CatalogItem::default()
        });
        let json = serde_json::to_value(&tool).unwrap();
        assert_eq!(json["tool_name"], "Reader");
        assert_eq!(json["supportedPlatforms"][0], "ios");
        assert!(json.get("website_url").is_some());
    }

    #[test]
    fn test_failure_response_shape() {
        let response = TurnResponse::failure(ConversationState::new());
        assert!(!response.success);
        assert!(!response.show_interface);
        assert!(response.bot_message.contains("start over"));
    }

    #[test]
    fn test_sort_request_accepts_partial_body() {
        let request: SortRequest = serde_json::from_str(
            r#"{"query": "zoom", "filters": {"platforms": ["ios"]}}"#,
        )
        .unwrap();
        assert_eq!(request.query, "zoom");
        assert!(request.visible_tools.is_empty());
        assert_eq!(request.filters.platforms.len(), 1);
    }
}
