//! Keyword-based "who is this for" recognition.
//!
//! Ordered pattern lists evaluated first-match-wins over the lowercased
//! utterance: self-referential patterns have the highest priority, then
//! the relationship table, then generic "someone else" phrasings.
//! Declaration order is the priority order, so the tables are slices, not
//! maps.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::conversation::Relationship;

/// Outcome of recognizing who the tools are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhoExtraction {
    /// The tools are for the user themselves.
    ForSelf,
    /// A specific relationship was named ("my mother", "for my friend").
    Relationship(Relationship),
    /// The user indicated another person without naming the relationship.
    SomeoneElse,
    /// No confident match; the caller should re-ask rather than escalate.
    Unrecognized,
}

static SELF_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(me|myself|for me|for myself|it'?s for me)\b",
        r"\bi am\b",
        r"\bi'?m\b",
        r"\bthis is for me\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("self pattern is valid"))
    .collect()
});

static RELATIONSHIP_PATTERNS: Lazy<Vec<(Regex, Relationship)>> = Lazy::new(|| {
    [
        (r"\b(my|for my)\s+(mom|mother|mama)\b", Relationship::Mother),
        (r"\b(my|for my)\s+(dad|father|papa|pop)\b", Relationship::Father),
        (r"\b(my|for my)\s+(son|boy)\b", Relationship::Son),
        (r"\b(my|for my)\s+(daughter|girl)\b", Relationship::Daughter),
        (r"\b(my|for my)\s+(wife|spouse)\b", Relationship::Wife),
        (r"\b(my|for my)\s+(husband|spouse)\b", Relationship::Husband),
        (r"\b(my|for my)\s+(brother|bro)\b", Relationship::Brother),
        (r"\b(my|for my)\s+(sister|sis)\b", Relationship::Sister),
        (r"\b(my|for my)\s+(friend|buddy|pal)\b", Relationship::Friend),
        (r"\b(my|for my)\s+(colleague|coworker)\b", Relationship::Colleague),
        (r"\b(my|for my)\s+(child|kid)\b", Relationship::Child),
        (r"\b(my|for my)\s+(parent|parents)\b", Relationship::Parent),
        (r"\b(my|for my)\s+(grandma|grandmother)\b", Relationship::Grandmother),
        (r"\b(my|for my)\s+(grandpa|grandfather)\b", Relationship::Grandfather),
        (r"\b(my|for my)\s+(uncle)\b", Relationship::Uncle),
        (r"\b(my|for my)\s+(aunt)\b", Relationship::Aunt),
        (r"\b(my|for my)\s+(cousin)\b", Relationship::Cousin),
        (r"\b(my|for my)\s+(student)\b", Relationship::Student),
    ]
    .iter()
    .map(|(p, rel)| (Regex::new(p).expect("relationship pattern is valid"), *rel))
    .collect()
});

static SOMEONE_ELSE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bsomeone else\b",
        r"\banother person\b",
        r"\bnot for me\b",
        r"\bfor someone\b",
        r"\bother person\b",
        r"\bsomeone\b",
        r"\bfor a friend\b",
        r"\bfor my friend\b",
        r"\bfor a family member\b",
        r"\bfor someone i know\b",
        r"\bfor a colleague\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("someone-else pattern is valid"))
    .collect()
});

/// Recognizes who the tools are for. Pure over the utterance; the caller
/// owns all state mutation.
pub fn extract_who(utterance: &str) -> WhoExtraction {
    let message = utterance.to_lowercase();
    let message = message.trim();

    if SELF_PATTERNS.iter().any(|p| p.is_match(message)) {
        return WhoExtraction::ForSelf;
    }

    for (pattern, relationship) in RELATIONSHIP_PATTERNS.iter() {
        if pattern.is_match(message) {
            return WhoExtraction::Relationship(*relationship);
        }
    }

    if SOMEONE_ELSE_PATTERNS.iter().any(|p| p.is_match(message)) {
        return WhoExtraction::SomeoneElse;
    }

    WhoExtraction::Unrecognized
}
