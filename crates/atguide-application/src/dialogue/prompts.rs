//! Reasoning-adapter prompt templates.
//!
//! Jinja2 templates rendered with serde context. Both prompts embed a
//! strict JSON response schema; the device prompt additionally carries
//! the platform mapping table. Self/other wording is switched by a
//! template conditional rather than duplicating the prompt text.

use minijinja::{Environment, context};
use once_cell::sync::Lazy;

use atguide_core::conversation::TARGET_SELF;

const DEVICE_ANALYSIS_TEMPLATE: &str = r#"User: "{{ user_message }}"

{% if is_self -%}
Task: Determine available devices. If unclear devices mentioned (smartphone, laptop, computer without OS), ask for clarification. Never assume laptop/computer OS.
{%- else -%}
Task: Determine available devices for {{ target_person }}. If unclear devices mentioned, ask for clarification. Never assume laptop/computer OS.
{%- endif %}

If "windows and mac" mentioned, they have multiple devices with different OS.

{% if is_self -%}
If they said they have no devices, proceed without platform filters.
{%- else -%}
If they said {{ target_person }} has no devices, proceed without platform filters.
{%- endif %}

Device mappings:
- iPhone -> ios
- Android phone/tablet -> android
- iPad -> ipados
- Windows computer/laptop/PC -> windows
- Mac computer/laptop -> macos
- Chromebook -> chromeos

Respond with JSON:
{
    "action": "ask_clarification" or "extract_devices" or "no_devices",
    "bot_message": "your response to user",
    "extracted_platforms": ["windows", "ios", etc] (only if action is extract_devices)
}

Examples:
- "smartphone and laptop" -> ask_clarification
- "iPhone and Windows laptop" -> extract_devices: ["ios", "windows"]
- "windows and mac" -> extract_devices: ["windows", "macos"]
- "no devices" -> no_devices
"#;

const CATEGORY_ANALYSIS_TEMPLATE: &str = r#"Recent conversation (most recent last):
{{ history_text }}

Current message{% if not is_self %} about {{ target_person }}{% endif %}: "{{ user_message }}"

{% if clarify -%}
Task: Refine the problem summary{% if not is_self %} for {{ target_person }}{% endif %} and check if you are HIGHLY CONFIDENT about ALL relevant categories. Only set ambiguous=false if you are 100% certain about every category AND certain no other categories might apply. If uncertain about any category, ask ONE helpful clarifying question (or explain your question if they asked "what do you mean?").
{%- else -%}
Task: Maintain and refine a concise problem summary{% if not is_self %} for {{ target_person }}{% endif %} and determine if you are HIGHLY CONFIDENT about ALL relevant categories. Only set ambiguous=false if you are 100% certain about every category you list AND certain no other categories might apply.
{%- endif %}
Categories to choose from: reading, cognitive, vision, physical, hearing, speech

Return ONLY JSON:
{
  "updated_summary": "one sentence summary of the actual problem",
  "ambiguous": true or false,
  "categories": ["only categories you are 100% confident about"],
  "question": "one short clarifying question if ambiguous else empty"
}
"#;

static PROMPT_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("device_analysis", DEVICE_ANALYSIS_TEMPLATE)
        .expect("device analysis template is valid");
    env.add_template("category_analysis", CATEGORY_ANALYSIS_TEMPLATE)
        .expect("category analysis template is valid");
    env
});

/// Renders the device fallback prompt.
pub fn device_analysis_prompt(user_message: &str, target_person: &str) -> String {
    PROMPT_ENV
        .get_template("device_analysis")
        .expect("device analysis template is registered")
        .render(context! {
            user_message,
            target_person,
            is_self => target_person == TARGET_SELF,
        })
        .expect("device analysis template renders")
}

/// Renders the disability-category analysis prompt. `clarify` selects the
/// follow-up wording used inside the clarification loop.
pub fn category_analysis_prompt(
    history_text: &str,
    user_message: &str,
    target_person: &str,
    clarify: bool,
) -> String {
    PROMPT_ENV
        .get_template("category_analysis")
        .expect("category analysis template is registered")
        .render(context! {
            history_text,
            user_message,
            target_person,
            is_self => target_person == TARGET_SELF,
            clarify,
        })
        .expect("category analysis template renders")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_prompt_self_wording() {
        let prompt = device_analysis_prompt("a smartphone", TARGET_SELF);
        assert!(prompt.contains("Task: Determine available devices."));
        assert!(prompt.contains("\"a smartphone\""));
        assert!(prompt.contains("Chromebook -> chromeos"));
        assert!(!prompt.contains("for you,"));
    }

    #[test]
    fn test_device_prompt_other_wording() {
        let prompt = device_analysis_prompt("a smartphone", "your mother");
        assert!(prompt.contains("Determine available devices for your mother."));
        assert!(prompt.contains("If they said your mother has no devices"));
    }

    #[test]
    fn test_category_prompt_switches_on_clarify() {
        let initial = category_analysis_prompt("user: hi", "I can't read", TARGET_SELF, false);
        assert!(initial.contains("Maintain and refine"));
        let follow_up = category_analysis_prompt("user: hi", "small text", TARGET_SELF, true);
        assert!(follow_up.contains("Refine the problem summary"));
        assert!(follow_up.contains("what do you mean?"));
    }

    #[test]
    fn test_category_prompt_embeds_history_and_schema() {
        let prompt =
            category_analysis_prompt("user: hello\nbot: hi", "screens are blurry", TARGET_SELF, false);
        assert!(prompt.contains("user: hello\nbot: hi"));
        assert!(prompt.contains("\"ambiguous\": true or false"));
        assert!(prompt.contains("reading, cognitive, vision, physical, hearing, speech"));
    }
}
