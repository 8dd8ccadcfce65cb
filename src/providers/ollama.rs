//! Ollama provider implementation for Wellness Chat
//!
//! This module implements the Provider trait for Ollama, connecting to a local
//! or remote Ollama server. The directive goes out as a `system` message and
//! the user's text as a single `user` message on `/api/chat`.

use crate::config::OllamaConfig;
use crate::error::{Result, WellnessError};
use crate::providers::base::require_text;
use crate::providers::{GenerationRequest, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama API provider
///
/// # Examples
///
/// ```no_run
/// use wellness_chat::config::{GenerationConfig, OllamaConfig};
/// use wellness_chat::providers::{GenerationRequest, OllamaProvider, Provider};
///
/// # async fn example() -> wellness_chat::error::Result<()> {
/// let provider = OllamaProvider::new(OllamaConfig::default(), 120)?;
/// let request = GenerationRequest::new("Be kind", "Hello!", GenerationConfig::default());
/// let reply = provider.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

/// Request structure for Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    stream: bool,
    options: OllamaOptions,
}

/// Message structure for Ollama API
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
}

/// Sampling options for Ollama API
#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    top_p: f32,
}

/// Response structure from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    message: Option<OllamaMessage>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Ollama configuration containing host and model
    /// * `timeout_seconds` - HTTP timeout for a single call
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::config::OllamaConfig;
    /// use wellness_chat::providers::OllamaProvider;
    ///
    /// let provider = OllamaProvider::new(OllamaConfig::default(), 120);
    /// assert!(provider.is_ok());
    /// ```
    pub fn new(config: OllamaConfig, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("wellness-chat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WellnessError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Ollama provider: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Get the configured Ollama host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    fn build_request(&self, request: &GenerationRequest) -> OllamaRequest {
        OllamaRequest {
            model: self.config.model.clone(),
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: request.system_instruction.clone(),
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: request.message.clone(),
                },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                top_p: request.top_p,
            },
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!("{}/api/chat", self.config.host.trim_end_matches('/'));
        let ollama_request = self.build_request(request);

        tracing::debug!(
            "Sending Ollama request: model={}, directive_chars={}, message_chars={}",
            ollama_request.model,
            request.system_instruction.len(),
            request.message.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Ollama request failed: {}", e);
                WellnessError::Provider(format!("Ollama request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, error_text);
            return Err(WellnessError::Provider(format!(
                "Ollama returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Ollama response: {}", e);
            WellnessError::Provider(format!("Failed to parse Ollama response: {}", e))
        })?;

        tracing::debug!(
            "Ollama response: done={}, prompt_tokens={}, completion_tokens={}",
            ollama_response.done,
            ollama_response.prompt_eval_count,
            ollama_response.eval_count
        );

        require_text(ollama_response.message.map(|m| m.content), self.name())
    }

    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(host: String) -> OllamaProvider {
        let config = OllamaConfig {
            host,
            model: "llama3.2:latest".to_string(),
        };
        OllamaProvider::new(config, 5).unwrap()
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("directive", "I feel stressed", GenerationConfig::default())
    }

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new(OllamaConfig::default(), 120).unwrap();
        assert_eq!(provider.host(), "http://localhost:11434");
        assert_eq!(provider.model(), "llama3.2:latest");
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_build_request_places_directive_as_system_message() {
        let provider = provider_for("http://localhost:11434".to_string());
        let built = provider.build_request(&request());
        assert_eq!(built.messages.len(), 2);
        assert_eq!(built.messages[0].role, "system");
        assert_eq!(built.messages[0].content, "directive");
        assert_eq!(built.messages[1].role, "user");
        assert_eq!(built.messages[1].content, "I feel stressed");
        assert!(!built.stream);
        assert_eq!(built.options.top_p, 0.95);
    }

    #[tokio::test]
    async fn test_generate_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({
                "model": "llama3.2:latest",
                "stream": false,
                "messages": [
                    { "role": "system", "content": "directive" },
                    { "role": "user", "content": "I feel stressed" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "role": "assistant", "content": "Try a short breathing exercise." },
                "done": true,
                "prompt_eval_count": 42,
                "eval_count": 7
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(server.uri());
        let reply = provider.generate(&request()).await.unwrap();
        assert_eq!(reply, "Try a short breathing exercise.");
    }

    #[tokio::test]
    async fn test_generate_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(server.uri());
        let err = provider.generate(&request()).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_generate_empty_content_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": { "role": "assistant", "content": "" },
                "done": true
            })))
            .mount(&server)
            .await;

        let provider = provider_for(server.uri());
        let err = provider.generate(&request()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WellnessError>(),
            Some(WellnessError::EmptyResponse(_))
        ));
    }
}
