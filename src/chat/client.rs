//! Response client: one provider call per user message
//!
//! Shapes the request (directive plus new message), issues it once and
//! returns the provider's text unchanged. Every failure, from a missing
//! credential at construction time to an empty payload, is logged here and
//! replaced by the apology for the requested language. Callers only ever
//! receive a `String`.

use crate::config::{GenerationConfig, ProviderConfig};
use crate::error::Result;
use crate::localization::LanguageCatalog;
use crate::prompts::build_system_prompt;
use crate::providers::{create_provider, GenerationRequest, Provider};
use std::sync::Arc;

enum Backend {
    Ready(Arc<dyn Provider>),
    Unavailable(String),
}

/// Turns a transcript and a new message into a reply string
pub struct ResponseClient {
    backend: Backend,
    catalog: Arc<LanguageCatalog>,
    generation: GenerationConfig,
}

impl ResponseClient {
    /// Wraps an already constructed provider
    pub fn new(
        provider: Arc<dyn Provider>,
        catalog: Arc<LanguageCatalog>,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            backend: Backend::Ready(provider),
            catalog,
            generation,
        }
    }

    /// Builds the configured provider
    ///
    /// Construction failures (such as a missing API key) are logged once
    /// and leave the client permanently unavailable; every later call then
    /// answers with the apology instead of failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use wellness_chat::chat::ResponseClient;
    /// use wellness_chat::config::ProviderConfig;
    /// use wellness_chat::localization::LanguageCatalog;
    ///
    /// // No API key configured for the default provider.
    /// let client = ResponseClient::from_config(
    ///     &ProviderConfig::default(),
    ///     Arc::new(LanguageCatalog::builtin()),
    /// );
    /// assert!(!client.is_available());
    /// ```
    pub fn from_config(config: &ProviderConfig, catalog: Arc<LanguageCatalog>) -> Self {
        let backend = match create_provider(config) {
            Ok(provider) => Backend::Ready(Arc::from(provider)),
            Err(e) => {
                tracing::error!(
                    "Failed to initialize {} provider: {}",
                    config.provider_type,
                    e
                );
                Backend::Unavailable(e.to_string())
            }
        };

        Self {
            backend,
            catalog,
            generation: config.generation,
        }
    }

    /// Whether a provider was constructed successfully
    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    /// Name of the backing provider, if any
    pub fn provider_name(&self) -> Option<&'static str> {
        match &self.backend {
            Backend::Ready(provider) => Some(provider.name()),
            Backend::Unavailable(_) => None,
        }
    }

    /// Catalog used for language names and apologies
    pub fn catalog(&self) -> &Arc<LanguageCatalog> {
        &self.catalog
    }

    /// Produce the reply to `message`
    ///
    /// # Arguments
    ///
    /// * `transcript` - Prior conversation as `sender: text` lines
    /// * `message` - The new user message
    /// * `language` - Language code; unknown codes use the default language
    ///
    /// # Returns
    ///
    /// The provider's text, or the apology for `language` when the call
    /// could not produce one
    pub async fn respond(&self, transcript: &str, message: &str, language: &str) -> String {
        match self.try_respond(transcript, message, language).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Error generating content: {}", e);
                self.catalog.apology(language).to_string()
            }
        }
    }

    async fn try_respond(&self, transcript: &str, message: &str, language: &str) -> Result<String> {
        let provider = match &self.backend {
            Backend::Ready(provider) => provider,
            Backend::Unavailable(reason) => {
                tracing::warn!("Provider unavailable: {}", reason);
                return Err(crate::error::WellnessError::Provider(format!(
                    "Provider unavailable: {}",
                    reason
                ))
                .into());
            }
        };

        let language_name = self.catalog.language_name(language);
        let request = GenerationRequest::new(
            build_system_prompt(language_name, transcript),
            message,
            self.generation,
        );

        tracing::debug!(
            "Requesting reply from {} ({}) in {}",
            provider.name(),
            provider.model(),
            language_name
        );

        provider.generate(&request).await
    }
}
