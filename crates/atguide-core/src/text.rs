//! Text sanitization helpers shared by the dialogue and prompt layers.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Maximum length of a problem summary in characters.
pub const PROBLEM_SUMMARY_MAX_CHARS: usize = 180;

/// Collapses whitespace runs to single spaces, trims, and escapes double
/// quotes so the text can be embedded into JSON-bearing prompts.
pub fn sanitize_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    collapsed.trim().replace('"', "\\\"")
}

/// Creates a concise, sanitized summary of the user's problem for UI and
/// sorting text. Summaries longer than [`PROBLEM_SUMMARY_MAX_CHARS`] are
/// truncated with a trailing ellipsis.
pub fn create_problem_summary(text: &str) -> String {
    let cleaned = sanitize_text(text);
    truncate_chars(&cleaned, PROBLEM_SUMMARY_MAX_CHARS)
}

/// Truncates `text` to at most `max_chars` characters, replacing the tail
/// with `"..."` when the limit is exceeded.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_collapses_whitespace() {
        assert_eq!(
            sanitize_text("  I   can't\n\nread\tsmall text  "),
            "I can't read small text"
        );
    }

    #[test]
    fn test_sanitize_escapes_quotes() {
        assert_eq!(sanitize_text(r#"the "zoom" button"#), r#"the \"zoom\" button"#);
    }

    #[test]
    fn test_summary_truncates_long_text() {
        let long = "a".repeat(400);
        let summary = create_problem_summary(&long);
        assert_eq!(summary.chars().count(), PROBLEM_SUMMARY_MAX_CHARS);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_summary_keeps_short_text() {
        assert_eq!(create_problem_summary("hard to read"), "hard to read");
    }
}
