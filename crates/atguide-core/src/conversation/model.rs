//! Conversation state model.
//!
//! The single mutable aggregate threaded through every turn. The caller
//! round-trips the full state object; the server keeps no session store,
//! so concurrent conversations are isolated by construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::Display;

use super::message::ChatMessage;
use super::step::ConversationStep;
use crate::catalog::{AppliedFilters, Platform, ToolFunction};

/// Target descriptor used when the tools are for the user themselves.
pub const TARGET_SELF: &str = "you";

/// Privacy-preserving target descriptor used when the user declines to
/// name a relationship.
pub const TARGET_ANONYMOUS: &str = "the person you are searching for";

/// Fixed vocabulary of relationships the who-extractor can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Relationship {
    Mother,
    Father,
    Son,
    Daughter,
    Wife,
    Husband,
    Brother,
    Sister,
    Friend,
    Colleague,
    Child,
    Parent,
    Grandmother,
    Grandfather,
    Uncle,
    Aunt,
    Cousin,
    Student,
    /// The user said the tools are for someone they chose not to name.
    #[serde(rename = "someone else")]
    #[strum(serialize = "someone else")]
    SomeoneElse,
}

/// Conversation state round-tripped through the caller on every turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationState {
    /// Current dialogue step.
    pub step: ConversationStep,
    /// Free-form descriptor of who the tools are for ("you",
    /// "your mother", or the anonymous placeholder). Set once in the
    /// opening step and read-only afterward.
    pub target_person: String,
    /// Relationship category when the tools are for someone else.
    pub relationship: Option<Relationship>,
    /// Filters accumulated so far; only ever extended.
    pub applied_filters: AppliedFilters,
    /// Platforms resolved before a pending device clarification. Cleared
    /// once merged on the following turn.
    pub partial_devices: BTreeSet<Platform>,
    /// Raw problem text, appended across clarification rounds.
    pub problem_description: String,
    /// Sanitized, truncated summary of the problem for UI/sorting text.
    pub problem_summary: String,
    /// Function categories once confidently resolved.
    pub disability_categories: BTreeSet<ToolFunction>,
    /// Complete transcript, append-only.
    pub conversation_history: Vec<ChatMessage>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            step: ConversationStep::default(),
            target_person: TARGET_SELF.to_string(),
            relationship: None,
            applied_filters: AppliedFilters::default(),
            partial_devices: BTreeSet::new(),
            problem_description: String::new(),
            problem_summary: String::new(),
            disability_categories: BTreeSet::new(),
            conversation_history: Vec::new(),
        }
    }
}

impl ConversationState {
    /// Creates the state for a fresh conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the tools are for the user themselves.
    pub fn is_self_target(&self) -> bool {
        self.target_person == TARGET_SELF
    }

    /// Appends a user entry to the transcript.
    pub fn push_user(&mut self, message: impl Into<String>) {
        self.conversation_history.push(ChatMessage::user(message));
    }

    /// Appends a bot entry to the transcript.
    pub fn push_bot(&mut self, message: impl Into<String>) {
        self.conversation_history.push(ChatMessage::bot(message));
    }

    /// The most recent `count` transcript entries, oldest first.
    pub fn recent_history(&self, count: usize) -> &[ChatMessage] {
        let start = self.conversation_history.len().saturating_sub(count);
        &self.conversation_history[start..]
    }
}
