//! Gemini provider implementation for Wellness Chat
//!
//! Calls the hosted `generateContent` endpoint with the directive in the
//! `systemInstruction` channel and the user's text as the only content turn.
//! The API key is required at construction time; a provider without one is
//! never built.

use crate::config::GeminiConfig;
use crate::error::{Result, WellnessError};
use crate::providers::base::require_text;
use crate::providers::{GenerationRequest, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hosted Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use wellness_chat::config::{GeminiConfig, GenerationConfig};
/// use wellness_chat::providers::{GeminiProvider, GenerationRequest, Provider};
///
/// # async fn example() -> wellness_chat::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config, 120)?;
/// let request = GenerationRequest::new("Be kind", "Hello!", GenerationConfig::default());
/// let reply = provider.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        Some(text)
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Model, API base and credential
    /// * `timeout_seconds` - HTTP timeout for a single call
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` if no API key is configured, or a
    /// provider error if the HTTP client cannot be built
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::config::GeminiConfig;
    /// use wellness_chat::providers::GeminiProvider;
    ///
    /// assert!(GeminiProvider::new(GeminiConfig::default(), 120).is_err());
    ///
    /// let config = GeminiConfig {
    ///     api_key: Some("key".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(GeminiProvider::new(config, 120).is_ok());
    /// ```
    pub fn new(config: GeminiConfig, timeout_seconds: u64) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| WellnessError::MissingCredentials("gemini".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("wellness-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WellnessError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(request.system_instruction.clone()),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.message.clone()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
            },
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = Self::build_request(request);

        tracing::debug!(
            "Sending Gemini request: model={}, directive_chars={}, message_chars={}",
            self.config.model,
            request.system_instruction.len(),
            request.message.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini request failed: {}", e);
                WellnessError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(WellnessError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            WellnessError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            tracing::warn!("Gemini blocked the prompt: {}", reason);
        }
        if let Some(reason) = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
        {
            tracing::debug!("Gemini finish reason: {}", reason);
        }

        require_text(parsed.text(), self.name())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}
