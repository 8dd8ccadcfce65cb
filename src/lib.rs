//! wellness-chat - Multilingual wellness support chat library
//!
//! This library provides the session core of a wellness support chat: a
//! conversation store that always opens with a localized greeting, a
//! controller that allows one outstanding reply at a time, and a response
//! client that asks a generative-text provider for a reply in the session
//! language.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `chat`: Messages, conversation store, response client and controller
//! - `localization`: Language catalog with greetings and apologies
//! - `prompts`: Support directive sent to the provider
//! - `providers`: Provider abstraction and implementations (Gemini, Ollama)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Terminal host for the chat session
//!
//! # Example
//!
//! ```no_run
//! use wellness_chat::{ChatController, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     let chat = ChatController::from_config(&config)?;
//!     chat.send("I can't sleep before exams").await;
//!     for message in chat.messages() {
//!         println!("{}: {}", message.sender, message.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod localization;
pub mod prompts;
pub mod providers;

// Re-export commonly used types
pub use chat::{ChatController, Message, Sender, SendOutcome};
pub use config::Config;
pub use error::{Result, WellnessError};
pub use localization::{LanguageCatalog, LocalizationEntry};
