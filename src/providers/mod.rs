//! Provider module for Wellness Chat
//!
//! This module contains the text-generation provider abstraction and
//! implementations for hosted Gemini and local Ollama.

pub mod base;
pub mod gemini;
pub mod ollama;

pub use base::{GenerationRequest, Provider};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, WellnessError};

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration; `provider_type` selects the backend
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or construction fails,
/// including a missing credential for providers that need one
///
/// # Examples
///
/// ```
/// use wellness_chat::config::ProviderConfig;
/// use wellness_chat::providers::create_provider;
///
/// let config = ProviderConfig {
///     provider_type: "ollama".to_string(),
///     ..Default::default()
/// };
/// let provider = create_provider(&config).unwrap();
/// assert_eq!(provider.name(), "ollama");
/// ```
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(
            config.gemini.clone(),
            config.timeout_seconds,
        )?)),
        "ollama" => Ok(Box::new(OllamaProvider::new(
            config.ollama.clone(),
            config.timeout_seconds,
        )?)),
        other => Err(WellnessError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;

    #[test]
    fn test_create_provider_invalid_type() {
        let config = ProviderConfig {
            provider_type: "invalid".to_string(),
            ..Default::default()
        };
        let err = create_provider(&config).err().expect("should fail");
        assert!(err.to_string().contains("Unknown provider type"));
    }

    #[test]
    fn test_create_gemini_without_key_fails() {
        let config = ProviderConfig::default();
        let err = create_provider(&config).err().expect("should fail");
        assert!(matches!(
            err.downcast_ref::<WellnessError>(),
            Some(WellnessError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_create_gemini_with_key() {
        let config = ProviderConfig {
            gemini: GeminiConfig {
                api_key: Some("key".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_create_ollama_needs_no_key() {
        let config = ProviderConfig {
            provider_type: "ollama".to_string(),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.model(), "llama3.2:latest");
    }
}
