//! Conversation transcript types.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

/// A single entry of the conversation transcript.
///
/// The transcript is append-only; it feeds the context window passed to
/// the reasoning adapter and doubles as an audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub message: String,
    /// Timestamp when the entry was recorded (RFC 3339). Absent in states
    /// produced by older callers.
    #[serde(default)]
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a user entry stamped with the current time.
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            message: message.into(),
            timestamp: now(),
        }
    }

    /// Creates a bot entry stamped with the current time.
    pub fn bot(message: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            message: message.into(),
            timestamp: now(),
        }
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&ChatRole::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_message_without_timestamp_deserializes() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role": "user", "message": "hello"}"#).unwrap();
        assert_eq!(msg.role, ChatRole::User);
        assert!(msg.timestamp.is_empty());
    }
}
