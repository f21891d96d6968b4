//! Schema-validating decode of reasoning-adapter responses.
//!
//! The reasoning service returns free text from which the first JSON
//! object span has already been extracted. The decoders here are
//! deliberately lenient field-by-field and fail open: an unexpected shape
//! becomes `ask_clarification` (devices) or "still ambiguous"
//! (categories), never an error.

use serde_json::Value;

use atguide_core::catalog::{Platform, ToolFunction};

use super::messages;

/// The closed set of actions the device fallback may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    AskClarification,
    ExtractDevices,
    NoDevices,
}

/// Decoded device-analysis response.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceAnalysis {
    pub action: FallbackAction,
    pub bot_message: String,
    pub extracted_platforms: Vec<Platform>,
}

impl DeviceAnalysis {
    /// Decodes a raw JSON value, defaulting to `AskClarification` with
    /// the stock clarification message on any unexpected shape.
    pub fn decode(value: &Value) -> Self {
        let action = match value.get("action").and_then(Value::as_str) {
            Some("extract_devices") => FallbackAction::ExtractDevices,
            Some("no_devices") => FallbackAction::NoDevices,
            _ => FallbackAction::AskClarification,
        };

        let bot_message = non_blank_str(value.get("bot_message"))
            .unwrap_or_else(|| messages::default_device_clarification().to_string());

        let extracted_platforms = value
            .get("extracted_platforms")
            .and_then(Value::as_array)
            .map(|array| {
                array
                    .iter()
                    .filter_map(|v| serde_json::from_value::<Platform>(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            action,
            bot_message,
            extracted_platforms,
        }
    }
}

/// Decoded category-analysis response.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAnalysis {
    pub updated_summary: Option<String>,
    pub ambiguous: Option<bool>,
    pub categories: Vec<ToolFunction>,
    pub question: Option<String>,
}

impl CategoryAnalysis {
    /// Decodes a raw JSON value; unknown category tokens are dropped.
    pub fn decode(value: &Value) -> Self {
        let categories = value
            .get("categories")
            .and_then(Value::as_array)
            .map(|array| {
                array
                    .iter()
                    .filter_map(|v| serde_json::from_value::<ToolFunction>(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            updated_summary: non_blank_str(value.get("updated_summary")),
            ambiguous: value.get("ambiguous").and_then(Value::as_bool),
            categories,
            question: non_blank_str(value.get("question")),
        }
    }

    /// True when the model was certain: `ambiguous` explicitly false and
    /// at least one category named.
    pub fn is_confident(&self) -> bool {
        self.ambiguous == Some(false) && !self.categories.is_empty()
    }
}

fn non_blank_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
