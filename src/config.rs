//! Configuration management for Wellness Chat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and environment variables.

use crate::error::{Result, WellnessError};
use crate::localization::{LanguageCatalog, LocalizationEntry, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Provider types the factory knows how to build
pub const VALID_PROVIDERS: [&str; 2] = ["gemini", "ollama"];

/// Main configuration structure for Wellness Chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Provider configuration (Gemini, Ollama)
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Chat session behavior
    #[serde(default)]
    pub chat: ChatConfig,

    /// Extra languages appended to the built-in catalog
    #[serde(default)]
    pub languages: Vec<LocalizationEntry>,
}

/// Provider configuration
///
/// Specifies which text-generation provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Hosted Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Ollama configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Sampling parameters shared by all providers
    #[serde(default)]
    pub generation: GenerationConfig,

    /// HTTP timeout for a single provider call (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
            generation: GenerationConfig::default(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Hosted Gemini provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model to use for generation
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// API key; usually supplied through `WELLNESS_API_KEY` or `API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            api_base: default_gemini_api_base(),
            api_key: None,
        }
    }
}

// Keeps the key out of logs and panics.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Ollama provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama server host
    #[serde(default = "default_ollama_host")]
    pub host: String,

    /// Model to use for Ollama
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:latest".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling probability mass
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Language a new session starts in
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Longest user message accepted; longer input is truncated
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_max_message_chars() -> usize {
    2000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            max_message_chars: default_max_message_chars(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| WellnessError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| WellnessError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(provider_type) = std::env::var("WELLNESS_PROVIDER") {
            self.provider.provider_type = provider_type;
        }

        if let Ok(model) = std::env::var("WELLNESS_GEMINI_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("WELLNESS_GEMINI_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(host) = std::env::var("WELLNESS_OLLAMA_HOST") {
            self.provider.ollama.host = host;
        }

        if let Ok(model) = std::env::var("WELLNESS_OLLAMA_MODEL") {
            self.provider.ollama.model = model;
        }

        if let Ok(language) = std::env::var("WELLNESS_LANGUAGE") {
            self.chat.default_language = language;
        }

        if let Ok(timeout) = std::env::var("WELLNESS_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid WELLNESS_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        let api_key = std::env::var("WELLNESS_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        if let Some(key) = api_key {
            self.provider.gemini.api_key = Some(key);
        }
    }

    /// Validate the configuration
    ///
    /// A missing provider credential is deliberately not checked here: it
    /// surfaces when the provider is constructed.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(WellnessError::Config("Provider type cannot be empty".to_string()).into());
        }

        if !VALID_PROVIDERS.contains(&self.provider.provider_type.as_str()) {
            return Err(WellnessError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                VALID_PROVIDERS.join(", ")
            ))
            .into());
        }

        let generation = &self.provider.generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(WellnessError::Config(
                "generation.temperature must be between 0.0 and 2.0".to_string(),
            )
            .into());
        }

        if generation.top_p <= 0.0 || generation.top_p > 1.0 {
            return Err(WellnessError::Config(
                "generation.top_p must be between 0.0 and 1.0".to_string(),
            )
            .into());
        }

        if self.provider.timeout_seconds == 0 {
            return Err(
                WellnessError::Config("timeout_seconds must be greater than 0".to_string()).into(),
            );
        }

        if self.chat.max_message_chars == 0 {
            return Err(WellnessError::Config(
                "chat.max_message_chars must be greater than 0".to_string(),
            )
            .into());
        }

        if self.chat.default_language.trim().is_empty() {
            return Err(WellnessError::Config(
                "chat.default_language cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }

    /// Build the language catalog: built-in languages plus configured extras
    ///
    /// # Errors
    ///
    /// Returns error if an extra language is malformed or reuses a code
    pub fn language_catalog(&self) -> Result<LanguageCatalog> {
        let mut catalog = LanguageCatalog::builtin();
        for entry in &self.languages {
            catalog
                .add(entry.clone())
                .map_err(|e| WellnessError::Config(format!("Invalid language entry: {}", e)))?;
        }
        Ok(catalog)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            chat: ChatConfig::default(),
            languages: Vec::new(),
        }
    }
}
