//! Dialogue state machine.
//!
//! Drives the guided conversation: each turn takes the caller-supplied
//! state and the new utterance, consults the deterministic extractors
//! (and, only when those have no signal, the reasoning adapter), mutates
//! the filter state, and produces the next bot message. The caller
//! round-trips the returned state; nothing is stored server-side.

pub mod analysis;
pub mod messages;
pub mod prompts;

use std::sync::Arc;
use tracing::{debug, warn};

use atguide_core::catalog::{AppliedFilters, CatalogRepository, filter_catalog};
use atguide_core::conversation::{
    ChatRole, ConversationState, ConversationStep, Relationship, TARGET_ANONYMOUS, TARGET_SELF,
};
use atguide_core::extract::{
    DeviceExtraction, WhoExtraction, clarification_question, extract_devices, extract_who,
};
use atguide_core::inference::{ReasoningProvider, extract_json_object};
use atguide_core::text::{create_problem_summary, sanitize_text};

use crate::response::TurnResponse;
use analysis::{CategoryAnalysis, DeviceAnalysis, FallbackAction};

/// Number of transcript entries passed to the reasoning adapter.
const HISTORY_WINDOW: usize = 6;
/// Per-entry character cap for the history context.
const HISTORY_ENTRY_MAX_CHARS: usize = 120;

/// What one handler produced besides the mutated state.
struct TurnOutcome {
    bot_message: String,
    show_interface: bool,
    request_sorting: bool,
}

impl TurnOutcome {
    fn quiet(bot_message: String) -> Self {
        Self {
            bot_message,
            show_interface: false,
            request_sorting: false,
        }
    }
}

/// Orchestrates the guided conversation.
pub struct DialogueService {
    reasoning: Arc<dyn ReasoningProvider>,
    catalog: Arc<dyn CatalogRepository>,
}

impl DialogueService {
    pub fn new(reasoning: Arc<dyn ReasoningProvider>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { reasoning, catalog }
    }

    /// Processes one conversation turn. Seeds a fresh state when none is
    /// supplied. Never fails: adapter and catalog problems degrade into
    /// the bot's wording rather than an error.
    pub async fn advance(&self, message: &str, state: Option<ConversationState>) -> TurnResponse {
        let mut state = state.unwrap_or_default();
        state.push_user(message);

        debug!(step = %state.step, "processing turn");

        let outcome = match state.step {
            ConversationStep::WhoIsThisFor => self.handle_who(message, &mut state),
            ConversationStep::DeviceAccessHome => self.handle_device(message, &mut state).await,
            ConversationStep::ProblemDescription => self.handle_problem(message, &mut state).await,
            ConversationStep::ClarifyDisability => self.handle_clarify(message, &mut state).await,
            ConversationStep::ShowResults => self.handle_show_results(&mut state).await,
            ConversationStep::Unknown => {
                // Defensive reset for states produced by older callers.
                warn!("unrecognized conversation step, resetting");
                state.step = ConversationStep::WhoIsThisFor;
                self.handle_who(message, &mut state)
            }
        };

        state.push_bot(&outcome.bot_message);

        TurnResponse {
            bot_message: outcome.bot_message,
            state,
            success: true,
            show_interface: outcome.show_interface,
            request_sorting: outcome.request_sorting,
        }
    }

    // ------------------------------------------------------------------
    // Step handlers
    // ------------------------------------------------------------------

    fn handle_who(&self, message: &str, state: &mut ConversationState) -> TurnOutcome {
        // First interaction: emit the opening question, no extraction.
        if message.trim().is_empty() || state.conversation_history.len() <= 1 {
            return TurnOutcome::quiet(messages::opening_question().to_string());
        }

        match extract_who(message) {
            WhoExtraction::ForSelf => {
                state.target_person = TARGET_SELF.to_string();
                state.relationship = None;
                state.step = ConversationStep::DeviceAccessHome;
                TurnOutcome::quiet(messages::device_question_for_self())
            }
            WhoExtraction::Relationship(relationship) => {
                state.target_person = format!("your {relationship}");
                state.relationship = Some(relationship);
                state.step = ConversationStep::DeviceAccessHome;
                TurnOutcome::quiet(messages::device_question_for_relationship(relationship))
            }
            WhoExtraction::SomeoneElse => {
                // Privacy-preserving: no follow-up relationship question.
                state.target_person = TARGET_ANONYMOUS.to_string();
                state.relationship = Some(Relationship::SomeoneElse);
                state.step = ConversationStep::DeviceAccessHome;
                TurnOutcome::quiet(messages::device_question_for_them())
            }
            WhoExtraction::Unrecognized => {
                // Low confidence: re-ask, never escalate this intent.
                TurnOutcome::quiet(messages::who_clarification().to_string())
            }
        }
    }

    async fn handle_device(&self, message: &str, state: &mut ConversationState) -> TurnOutcome {
        if message.trim().is_empty() {
            let bot_message = if state.is_self_target() {
                messages::device_question_for_self()
            } else {
                messages::device_question_for_them()
            };
            return TurnOutcome::quiet(bot_message);
        }

        // Drain stashed partials; whichever branch runs next owns them.
        let partials = std::mem::take(&mut state.partial_devices);

        match extract_devices(message, &partials) {
            DeviceExtraction::NoDevices => {
                state.step = ConversationStep::ProblemDescription;
                TurnOutcome::quiet(messages::no_devices_message(
                    &state.target_person,
                    state.is_self_target(),
                ))
            }
            DeviceExtraction::Resolved(platforms) => {
                state.applied_filters.platforms.extend(platforms);
                state.step = ConversationStep::ProblemDescription;
                TurnOutcome {
                    bot_message: messages::problem_prompt(
                        &state.target_person,
                        state.is_self_target(),
                    ),
                    show_interface: true,
                    request_sorting: false,
                }
            }
            DeviceExtraction::NeedsClarification { resolved, unclear } => {
                state.partial_devices = resolved;
                TurnOutcome::quiet(clarification_question(&unclear, &state.target_person))
            }
            DeviceExtraction::Unrecognized => self.device_fallback(message, state).await,
        }
    }

    /// Escalates an unrecognized device utterance to the reasoning
    /// adapter. Adapter failure or an unparseable answer fails open into
    /// a clarification question.
    async fn device_fallback(&self, message: &str, state: &mut ConversationState) -> TurnOutcome {
        debug!("device extraction escalated to reasoning adapter");

        let prompt = prompts::device_analysis_prompt(message, &state.target_person);
        let raw = match self.reasoning.complete(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "device analysis call failed");
                String::new()
            }
        };
        let analysis = DeviceAnalysis::decode(&extract_json_object(&raw));

        match analysis.action {
            FallbackAction::ExtractDevices => {
                let resolved_any = !analysis.extracted_platforms.is_empty();
                state
                    .applied_filters
                    .platforms
                    .extend(analysis.extracted_platforms);
                state.step = ConversationStep::ProblemDescription;
                TurnOutcome {
                    bot_message: analysis.bot_message,
                    show_interface: resolved_any,
                    request_sorting: false,
                }
            }
            FallbackAction::NoDevices => {
                state.step = ConversationStep::ProblemDescription;
                TurnOutcome::quiet(analysis.bot_message)
            }
            FallbackAction::AskClarification => TurnOutcome::quiet(analysis.bot_message),
        }
    }

    async fn handle_problem(&self, message: &str, state: &mut ConversationState) -> TurnOutcome {
        state.problem_description = message.to_string();
        if state.problem_summary.is_empty() {
            state.problem_summary = create_problem_summary(message);
        }

        let analysis = self.category_analysis(message, state, false).await;
        self.apply_category_analysis(analysis, state).await
    }

    async fn handle_clarify(&self, message: &str, state: &mut ConversationState) -> TurnOutcome {
        let analysis = self.category_analysis(message, state, true).await;

        // Clarification rounds accumulate context, never replace it.
        state.problem_description = format!(
            "Original problem: {}\nAdditional details: {message}",
            state.problem_description
        );

        self.apply_category_analysis(analysis, state).await
    }

    async fn handle_show_results(&self, state: &mut ConversationState) -> TurnOutcome {
        // Absorbing state: every further turn re-issues ranking.
        let bot_message = self.results_message(&state.applied_filters).await;
        TurnOutcome {
            bot_message,
            show_interface: true,
            request_sorting: true,
        }
    }

    // ------------------------------------------------------------------
    // Shared pieces
    // ------------------------------------------------------------------

    async fn category_analysis(
        &self,
        message: &str,
        state: &ConversationState,
        clarify: bool,
    ) -> CategoryAnalysis {
        let history_text = history_window(state);
        let prompt =
            prompts::category_analysis_prompt(&history_text, message, &state.target_person, clarify);

        let raw = match self.reasoning.complete(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "category analysis call failed");
                String::new()
            }
        };
        CategoryAnalysis::decode(&extract_json_object(&raw))
    }

    async fn apply_category_analysis(
        &self,
        analysis: CategoryAnalysis,
        state: &mut ConversationState,
    ) -> TurnOutcome {
        if let Some(summary) = &analysis.updated_summary {
            state.problem_summary = create_problem_summary(summary);
        }

        if analysis.is_confident() {
            state.step = ConversationStep::ShowResults;
            state
                .disability_categories
                .extend(analysis.categories.iter().copied());
            state
                .applied_filters
                .functions
                .extend(analysis.categories.iter().copied());
            let bot_message = self.results_message(&state.applied_filters).await;
            TurnOutcome {
                bot_message,
                show_interface: true,
                request_sorting: true,
            }
        } else {
            state.step = ConversationStep::ClarifyDisability;
            let bot_message = analysis
                .question
                .unwrap_or_else(|| messages::default_category_question().to_string());
            TurnOutcome::quiet(bot_message)
        }
    }

    /// Final results message with the live matching count. A catalog
    /// failure degrades the count to zero rather than failing the turn.
    async fn results_message(&self, filters: &AppliedFilters) -> String {
        let count = match self.catalog.load_all().await {
            Ok(items) => filter_catalog(items, filters, None).len(),
            Err(err) => {
                warn!(error = %err, "result count unavailable");
                0
            }
        };
        messages::results_message(count)
    }
}

/// Formats the recent transcript for the reasoning prompt: the last
/// [`HISTORY_WINDOW`] entries, each sanitized and capped at
/// [`HISTORY_ENTRY_MAX_CHARS`] characters.
fn history_window(state: &ConversationState) -> String {
    state
        .recent_history(HISTORY_WINDOW)
        .iter()
        .map(|entry| {
            let role = match entry.role {
                ChatRole::User => "user",
                ChatRole::Bot => "bot",
            };
            let text: String = sanitize_text(&entry.message)
                .chars()
                .take(HISTORY_ENTRY_MAX_CHARS)
                .collect();
            format!("{role}: {text}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_window_caps_entries() {
        let mut state = ConversationState::new();
        for i in 0..8 {
            state.push_user(format!("message {i}"));
        }
        state.push_bot("x".repeat(500));

        let window = history_window(&state);
        let lines: Vec<&str> = window.lines().collect();
        assert_eq!(lines.len(), HISTORY_WINDOW);
        assert!(lines[0].starts_with("user: message 3"));
        let last = lines.last().unwrap();
        assert_eq!(last.chars().count(), "bot: ".len() + HISTORY_ENTRY_MAX_CHARS);
    }
}
