//! Bot message texts.
//!
//! Product wording for every scripted turn of the conversation. The
//! device-list hint is shared across the three audience variants of the
//! device question.

use atguide_core::conversation::Relationship;

const DEVICE_LIST_HINT: &str = "at home, school, library etc. List all that you are interested \
     in ( PC, Mac, Chromebook, iPhone, iPad, Android Phone, Android Tablet, Fire tablet)";

/// Opening question of a fresh conversation.
pub fn opening_question() -> &'static str {
    "Hello! I'm here to help you find the right accessibility tools. First, let me ask: \
     Who are you searching for tools for? Is this for you, or for someone else?"
}

/// Device question when the tools are for the user themselves.
pub fn device_question_for_self() -> String {
    format!("Great! Now which devices would you like to be able to use or use better — {DEVICE_LIST_HINT}")
}

/// Device question naming the recognized relationship.
pub fn device_question_for_relationship(relationship: Relationship) -> String {
    format!(
        "Great! Now which devices would you like {relationship} to be able to use or use better — {DEVICE_LIST_HINT}"
    )
}

/// Device question for an unnamed other person.
pub fn device_question_for_them() -> String {
    format!("Great! Now which devices would you like them to be able to use or use better — {DEVICE_LIST_HINT}")
}

/// Re-ask when the who-extractor had no confident match.
pub fn who_clarification() -> &'static str {
    "Are you looking for accessibility tools for yourself, or for someone else?"
}

/// Prompt for the problem description once devices are resolved.
pub fn problem_prompt(target_person: &str, is_self: bool) -> String {
    if is_self {
        "Perfect! Now, please describe the problems you are having in accessing or using those devices?"
            .to_string()
    } else {
        format!(
            "Perfect! Now, please describe the problems {target_person} is having in accessing or using those devices?"
        )
    }
}

/// Response to "no devices" phrasing; proceeds without platform filters.
pub fn no_devices_message(target_person: &str, is_self: bool) -> String {
    if is_self {
        "I understand. Let's focus on what tools might be available to you. Please describe \
         the problems you are having in accessing or using those devices?"
            .to_string()
    } else {
        format!(
            "I understand. Let's focus on what tools might be available to {target_person}. \
             Please describe the problems {target_person} is having in accessing or using those devices?"
        )
    }
}

/// Default clarification when the device fallback produced no usable
/// message.
pub fn default_device_clarification() -> &'static str {
    "Could you tell me more about your devices?"
}

/// Default clarifying question when the category analysis produced none.
pub fn default_category_question() -> &'static str {
    "Could you tell me more about what you're having trouble with?"
}

/// Final message shown alongside the ranked result list.
pub fn results_message(matching_count: usize) -> String {
    format!(
        "Click on any item in the list on the right to learn more about it<br><br>\n\n\
         ✅ <strong>There are {matching_count} items that match. </strong><br>\n\
         If you would like to make the list shorter you can use the checkboxes under \
         “Built in or Installed?” Or “Purchase Options” to explore only items for each \
         of those categories."
    )
}

/// Bot message paired with `success:false` when a turn cannot be
/// processed; used by the transport boundary.
pub fn error_restart() -> &'static str {
    "I'm sorry, I encountered an error. Let's start over. What devices do you have access \
     to at home, school, work, library, or anywhere else?"
}
