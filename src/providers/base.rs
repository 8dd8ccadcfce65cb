//! Base provider trait and common types for Wellness Chat
//!
//! This module defines the Provider trait that all text-generation providers
//! implement, along with the single-turn request they receive.

use crate::config::GenerationConfig;
use crate::error::{Result, WellnessError};
use async_trait::async_trait;
use serde::Serialize;

/// A single-turn completion request
///
/// Carries the out-of-band system instruction (role, safety, language and
/// conversation context) and the one user message being answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    /// Behavioral directive for the assistant
    pub system_instruction: String,
    /// The new user message
    pub message: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling probability mass
    pub top_p: f32,
}

impl GenerationRequest {
    /// Creates a request with the given sampling parameters
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::config::GenerationConfig;
    /// use wellness_chat::providers::GenerationRequest;
    ///
    /// let request = GenerationRequest::new("Be kind", "Hello", GenerationConfig::default());
    /// assert_eq!(request.message, "Hello");
    /// assert_eq!(request.temperature, 0.7);
    /// ```
    pub fn new(
        system_instruction: impl Into<String>,
        message: impl Into<String>,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            message: message.into(),
            temperature: generation.temperature,
            top_p: generation.top_p,
        }
    }
}

/// Provider trait for text-generation providers
///
/// Implementations issue exactly one outbound call per [`Provider::generate`]
/// invocation and never retry. Any failure, including a response without
/// text, is returned as an error; translating it into something a user sees
/// is the caller's job.
///
/// # Examples
///
/// ```no_run
/// use wellness_chat::providers::{GenerationRequest, Provider};
/// use wellness_chat::error::Result;
/// use async_trait::async_trait;
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn generate(&self, request: &GenerationRequest) -> Result<String> {
///         Ok(request.message.clone())
///     }
///
///     fn name(&self) -> &'static str {
///         "echo"
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Produce a reply for `request`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails, the provider answers with a
    /// non-success status, or the payload carries no text
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Short provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Name of the model requests are sent to
    ///
    /// # Default Implementation
    ///
    /// Returns "unknown" for providers without a model notion.
    fn model(&self) -> String {
        "unknown".to_string()
    }
}

/// Reject missing or whitespace-only provider text
///
/// # Examples
///
/// ```
/// use wellness_chat::providers::base::require_text;
///
/// assert_eq!(require_text(Some("Hi".to_string()), "gemini").unwrap(), "Hi");
/// assert!(require_text(Some("  ".to_string()), "gemini").is_err());
/// assert!(require_text(None, "gemini").is_err());
/// ```
pub fn require_text(text: Option<String>, provider: &str) -> Result<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(WellnessError::EmptyResponse(format!("{} returned no text", provider)).into()),
    }
}
