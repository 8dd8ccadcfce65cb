//! Command-line interface definition for wellness-chat
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot questions and
//! listing the available languages.

use clap::{Parser, Subcommand};

/// wellness-chat - Multilingual wellness support chat
///
/// Talk to a supportive wellness assistant in English, Hindi, Tamil or
/// Telugu. The assistant is not a medical professional.
#[derive(Parser, Debug, Clone)]
#[command(name = "wellness-chat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for wellness-chat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Language code for the session (en, hi, ta, te)
        #[arg(short, long)]
        language: Option<String>,

        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Send a single message and print the reply
    Ask {
        /// Message to send
        message: String,

        /// Language code for the reply (en, hi, ta, te)
        #[arg(short, long)]
        language: Option<String>,

        /// Override the provider from config (gemini, ollama)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// List the available languages
    Languages,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat {
                language: None,
                provider: None,
            },
        }
    }
}
