//! Error types for Wellness Chat
//!
//! This module defines the error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.
//!
//! Provider failures never reach the chat controller: the response client
//! converts them into a localized apology (see [`crate::chat::client`]).
//! These variants are still what the providers and the configuration layer
//! produce internally, and what gets logged before being absorbed.

use thiserror::Error;

/// Main error type for Wellness Chat operations
#[derive(Error, Debug)]
pub enum WellnessError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (transport failures, non-success status, bad payloads)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credential for a provider that requires one
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// The provider answered but returned no usable text
    #[error("Provider returned an empty response: {0}")]
    EmptyResponse(String),

    /// Invalid input to a catalog or host operation
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Wellness Chat operations
///
/// Uses `anyhow::Error` as the error type so callers can attach context
/// while still downcasting to [`WellnessError`] when they need to.
pub type Result<T> = anyhow::Result<T>;
