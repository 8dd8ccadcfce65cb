//! System prompts for the support chat
//!
//! This module builds the behavioral directive that accompanies every
//! provider request.

pub mod support_prompt;

/// Builds the directive for one reply
///
/// # Arguments
///
/// * `language_name` - English name of the language the reply must use
/// * `transcript` - Conversation so far, excluding the message being answered
///
/// # Examples
///
/// ```
/// use wellness_chat::prompts::build_system_prompt;
///
/// let prompt = build_system_prompt("English", "");
/// assert!(prompt.contains("not a medical professional"));
/// ```
pub fn build_system_prompt(language_name: &str, transcript: &str) -> String {
    support_prompt::generate_support_prompt(language_name, transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::support_prompt::CRISIS_RESOURCES;

    #[test]
    fn test_prompt_pins_language() {
        let prompt = build_system_prompt("Hindi", "");
        assert!(prompt.contains("You MUST respond in Hindi."));
        assert!(!prompt.contains("respond in English"));
    }

    #[test]
    fn test_prompt_includes_crisis_escalation() {
        let prompt = build_system_prompt("English", "");
        assert!(prompt.contains("self-harm"));
        assert!(prompt.contains(CRISIS_RESOURCES));
        assert!(prompt.contains("741741"));
        assert!(prompt.contains("988"));
    }

    #[test]
    fn test_prompt_includes_medical_disclaimer_and_tone() {
        let prompt = build_system_prompt("English", "");
        assert!(prompt.contains("Do not give medical diagnoses"));
        assert!(prompt.contains("not a medical professional"));
        assert!(prompt.contains("concise"));
        assert!(prompt.contains("encouraging"));
    }

    #[test]
    fn test_prompt_carries_transcript_as_context() {
        let transcript = "bot: Hello!\nuser: I can't sleep\nbot: Try a routine.";
        let prompt = build_system_prompt("English", transcript);
        assert!(prompt.ends_with(&format!("Previous conversation: {}", transcript)));
    }
}
