//! Wellness support system prompt
//!
//! The directive sent out-of-band with every provider call. It pins the
//! reply language, the tone, the crisis escalation rule and the
//! not-a-medical-professional disclosure, and carries the prior conversation
//! as context.

/// Crisis resources quoted verbatim when a user shows signs of distress
pub const CRISIS_RESOURCES: &str = "If you are in immediate danger, please contact a crisis hotline or emergency services. Here are some resources: Crisis Text Line (text HOME to 741741), The National Suicide Prevention Lifeline (988).";

/// Generates the system prompt for a wellness support reply
///
/// # Arguments
///
/// * `language_name` - English name of the reply language (e.g. "Hindi")
/// * `transcript` - Prior conversation, one `sender: text` line per message
///
/// # Examples
///
/// ```
/// use wellness_chat::prompts::support_prompt::generate_support_prompt;
///
/// let prompt = generate_support_prompt("Tamil", "bot: Hello!");
/// assert!(prompt.contains("You MUST respond in Tamil."));
/// assert!(prompt.ends_with("bot: Hello!"));
/// ```
pub fn generate_support_prompt(language_name: &str, transcript: &str) -> String {
    format!(
        r#"You are a helpful and friendly AI assistant for a student wellness app. Your goal is to provide supportive, safe, and informative advice on topics related to student life, mental health, physical fitness, and nutrition.
- You MUST respond in {language_name}.
- Keep responses concise and easy to understand.
- Use a positive and encouraging tone.
- If a user expresses serious distress, signs of self-harm, or a crisis, you MUST immediately provide a disclaimer and direct them to emergency resources. For example: "{crisis}"
- Do not give medical diagnoses. You can provide general health information but must state you are not a medical professional.
- Previous conversation: {transcript}"#,
        crisis = CRISIS_RESOURCES,
    )
}
