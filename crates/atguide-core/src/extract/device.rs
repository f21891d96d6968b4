//! Keyword-based device/platform recognition.
//!
//! A platform pattern table resolves specific device mentions to
//! canonical platform tokens. A second scan flags *ambiguous* category
//! words (smartphone, phone, laptop, computer, tablet) that need a
//! clarifying question, but only when no platform of that category's
//! family was detected in the same pass. The category patterns are
//! deliberately tolerant of common misspellings.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::catalog::Platform;

/// A device category that was mentioned without enough detail to map it
/// to a platform token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCategory {
    Smartphone,
    Phone,
    Laptop,
    Computer,
    Tablet,
}

/// Outcome of recognizing devices in an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceExtraction {
    /// The user has no devices; proceed with an empty platform filter.
    NoDevices,
    /// Every mentioned device resolved to a platform token (previously
    /// stashed partial platforms included).
    Resolved(BTreeSet<Platform>),
    /// Some categories need a clarifying question. `resolved` carries the
    /// platforms already known so the caller can stash them.
    NeedsClarification {
        resolved: BTreeSet<Platform>,
        unclear: Vec<DeviceCategory>,
    },
    /// No signal at all; the caller escalates to the reasoning adapter.
    Unrecognized,
}

static PLATFORM_PATTERNS: Lazy<Vec<(Platform, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("platform pattern is valid"))
            .collect()
    };
    vec![
        (Platform::Ios, compile(&[r"\biphone\b", r"\bios\b"])),
        (
            Platform::Android,
            compile(&[
                r"\bandroid\b",
                r"\bandroid phone\b",
                r"\bandroid tablet\b",
                r"\bfire\s*os\b",
                r"\bfire\s*tablet\b",
            ]),
        ),
        (Platform::Ipados, compile(&[r"\bipad\b"])),
        (
            Platform::Windows,
            compile(&[
                r"\bwindows\b",
                r"\bpc\b",
                r"\bwindows laptop\b",
                r"\bwindows computer\b",
            ]),
        ),
        (
            Platform::Macos,
            compile(&[
                r"\bmac\b",
                r"\bmacbook\b",
                r"\bmac laptop\b",
                r"\bmac computer\b",
                r"\bmacos\b",
            ]),
        ),
        (
            Platform::Chromeos,
            compile(&[r"\bchromebook\b", r"\bchrome os\b", r"\bchromeos\b"]),
        ),
    ]
});

struct CategoryRule {
    category: DeviceCategory,
    pattern: Regex,
    family: &'static [Platform],
}

const PHONE_FAMILY: &[Platform] = &[Platform::Ios, Platform::Android];
const COMPUTER_FAMILY: &[Platform] = &[Platform::Windows, Platform::Macos, Platform::Chromeos];
const TABLET_FAMILY: &[Platform] = &[Platform::Android, Platform::Ipados];

static CATEGORY_RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    let rule = |category, pattern: &str, family| CategoryRule {
        category,
        pattern: Regex::new(pattern).expect("category pattern is valid"),
        family,
    };
    vec![
        rule(
            DeviceCategory::Smartphone,
            r"\bsm[ae]rtphon[ea]s?\b|\bsmart\s+phon[ea]s?\b",
            PHONE_FAMILY,
        ),
        rule(DeviceCategory::Phone, r"\bphon[ea]s?\b|\bfon[ea]s?\b", PHONE_FAMILY),
        rule(DeviceCategory::Laptop, r"\bla[bp]to[bp]s?\b", COMPUTER_FAMILY),
        rule(DeviceCategory::Computer, r"\bcom[pb]ut[eo]rs?\b", COMPUTER_FAMILY),
        rule(DeviceCategory::Tablet, r"\bta[bp]l[ei]ts?\b", TABLET_FAMILY),
    ]
});

static NO_DEVICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bno devices?\b|\bdon'?t have\b.*\bdevices?\b").expect("no-device pattern is valid")
});

/// Recognizes device platforms in an utterance.
///
/// `partial_devices` carries platforms resolved on a previous turn while
/// a clarification was pending; they count as already detected so their
/// category is not re-flagged as unclear. Pure over its inputs; the
/// caller owns all state mutation.
pub fn extract_devices(
    utterance: &str,
    partial_devices: &BTreeSet<Platform>,
) -> DeviceExtraction {
    let message = utterance.to_lowercase();
    let message = message.trim();

    let mut detected: BTreeSet<Platform> = partial_devices.clone();
    for (platform, patterns) in PLATFORM_PATTERNS.iter() {
        if patterns.iter().any(|p| p.is_match(message)) {
            detected.insert(*platform);
        }
    }

    let unclear: Vec<DeviceCategory> = CATEGORY_RULES
        .iter()
        .filter(|rule| {
            rule.pattern.is_match(message)
                && !rule.family.iter().any(|p| detected.contains(p))
        })
        .map(|rule| rule.category)
        .collect();

    // "No devices" phrasing short-circuits everything else.
    if NO_DEVICE_PATTERN.is_match(message) {
        return DeviceExtraction::NoDevices;
    }

    if !detected.is_empty() && unclear.is_empty() {
        return DeviceExtraction::Resolved(detected);
    }

    if !unclear.is_empty() {
        return DeviceExtraction::NeedsClarification {
            resolved: detected,
            unclear,
        };
    }

    DeviceExtraction::Unrecognized
}

/// Composes the clarifying question for the unclear categories, one
/// question per device family.
pub fn clarification_question(unclear: &[DeviceCategory], target_person: &str) -> String {
    let mut questions = Vec::new();

    if unclear
        .iter()
        .any(|c| matches!(c, DeviceCategory::Smartphone | DeviceCategory::Phone))
    {
        questions.push("What type of smartphone/phone (iPhone or Android)?");
    }
    if unclear
        .iter()
        .any(|c| matches!(c, DeviceCategory::Laptop | DeviceCategory::Computer))
    {
        questions.push(
            "What operating system for the laptop/computer (Windows, Mac, or Chromebook)?",
        );
    }
    if unclear.iter().any(|c| matches!(c, DeviceCategory::Tablet)) {
        questions.push("What type of tablet (iPad or Android tablet)?");
    }

    let joined = questions.join(" And ");
    if target_person == crate::conversation::TARGET_SELF {
        format!("Great! To help you find the right tools, could you tell me: {joined}")
    } else {
        format!("Great! To help find the right tools for {target_person}, could you tell me: {joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_partials() -> BTreeSet<Platform> {
        BTreeSet::new()
    }

    fn platforms(list: &[Platform]) -> BTreeSet<Platform> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_specific_devices_resolve() {
        let result = extract_devices("I have an iPhone and a Windows laptop", &no_partials());
        assert_eq!(
            result,
            DeviceExtraction::Resolved(platforms(&[Platform::Ios, Platform::Windows]))
        );
    }

    #[test]
    fn test_extraction_is_order_independent() {
        let a = extract_devices("iPhone and Windows laptop", &no_partials());
        let b = extract_devices("Windows laptop and iPhone", &no_partials());
        assert_eq!(a, b);
    }

    #[test]
    fn test_fire_tablet_maps_to_android() {
        let result = extract_devices("we use a fire tablet", &no_partials());
        assert_eq!(result, DeviceExtraction::Resolved(platforms(&[Platform::Android])));
    }

    #[test]
    fn test_bare_laptop_needs_clarification() {
        let result = extract_devices("I have a laptop and an iPhone", &no_partials());
        assert_eq!(
            result,
            DeviceExtraction::NeedsClarification {
                resolved: platforms(&[Platform::Ios]),
                unclear: vec![DeviceCategory::Laptop],
            }
        );
    }

    #[test]
    fn test_partials_merge_on_follow_up() {
        let result = extract_devices("it's a Mac", &platforms(&[Platform::Ios]));
        assert_eq!(
            result,
            DeviceExtraction::Resolved(platforms(&[Platform::Ios, Platform::Macos]))
        );
    }

    #[test]
    fn test_partials_suppress_category_reflag() {
        // A resolved phone platform from the previous turn means "phone"
        // alone is no longer ambiguous.
        let result = extract_devices("just the phone", &platforms(&[Platform::Ios]));
        assert_eq!(result, DeviceExtraction::Resolved(platforms(&[Platform::Ios])));
    }

    #[test]
    fn test_qualified_laptop_is_not_ambiguous() {
        let result = extract_devices("a windows laptop", &no_partials());
        assert_eq!(result, DeviceExtraction::Resolved(platforms(&[Platform::Windows])));
    }

    #[test]
    fn test_no_devices_short_circuits() {
        assert_eq!(
            extract_devices("I don't have any devices", &no_partials()),
            DeviceExtraction::NoDevices
        );
        assert_eq!(
            extract_devices("no devices", &platforms(&[Platform::Ios])),
            DeviceExtraction::NoDevices
        );
    }

    #[test]
    fn test_typo_tolerant_categories() {
        for utterance in ["my labtop", "two computors", "a tablit"] {
            match extract_devices(utterance, &no_partials()) {
                DeviceExtraction::NeedsClarification { .. } => {}
                other => panic!("expected clarification for {utterance}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unrelated_text_is_unrecognized() {
        assert_eq!(
            extract_devices("whatever you think is best", &no_partials()),
            DeviceExtraction::Unrecognized
        );
    }

    #[test]
    fn test_clarification_question_for_self() {
        let question = clarification_question(
            &[DeviceCategory::Phone, DeviceCategory::Laptop],
            crate::conversation::TARGET_SELF,
        );
        assert!(question.starts_with("Great! To help you find the right tools"));
        assert!(question.contains("iPhone or Android"));
        assert!(question.contains(" And "));
        assert!(question.contains("Windows, Mac, or Chromebook"));
    }

    #[test]
    fn test_clarification_question_for_other() {
        let question = clarification_question(&[DeviceCategory::Tablet], "your mother");
        assert!(question.contains("for your mother"));
        assert!(question.contains("iPad or Android tablet"));
    }
}
