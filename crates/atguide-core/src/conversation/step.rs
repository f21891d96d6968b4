//! Conversation step enum.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The current step of the guided conversation.
///
/// Steps only move forward (or into the clarification loop); `ShowResults`
/// is a stable absorbing state that keeps re-ranking on every further
/// turn. Unrecognized step values deserialize to `Unknown`, which the
/// dialogue layer treats as a defensive reset to the opening step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case", from = "String")]
#[strum(serialize_all = "snake_case")]
pub enum ConversationStep {
    WhoIsThisFor,
    DeviceAccessHome,
    ProblemDescription,
    ClarifyDisability,
    ShowResults,
    Unknown,
}

impl Default for ConversationStep {
    fn default() -> Self {
        Self::WhoIsThisFor
    }
}

impl From<String> for ConversationStep {
    fn from(value: String) -> Self {
        match value.as_str() {
            "who_is_this_for" => Self::WhoIsThisFor,
            "device_access_home" => Self::DeviceAccessHome,
            "problem_description" => Self::ProblemDescription,
            "clarify_disability" => Self::ClarifyDisability,
            "show_results" => Self::ShowResults,
            _ => Self::Unknown,
        }
    }
}
