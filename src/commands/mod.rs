/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `chat`      - Interactive support chat
- `ask`       - Send a single message and print the reply
- `languages` - List the configured languages

These handlers are thin hosts around [`crate::chat::ChatController`]; all
session rules live there.
*/

use crate::chat::{ChatController, Message, Sender};
use crate::config::Config;
use crate::error::Result;
use crate::localization::LanguageCatalog;
use colored::Colorize;

// Special commands parser for language switching and help
pub mod special_commands;

/// Format a message for terminal display
///
/// # Examples
///
/// ```
/// use wellness_chat::chat::Message;
/// use wellness_chat::commands::render_message;
///
/// let line = render_message(&Message::bot("Hello!"));
/// assert!(line.contains("Hello!"));
/// ```
pub fn render_message(message: &Message) -> String {
    match message.sender {
        Sender::Bot => format!("{} {}", "bot ›".green().bold(), message.text),
        Sender::User => format!("{} {}", "you ›".cyan().bold(), message.text),
    }
}

/// Format the language list, marking `active`
pub fn render_languages(catalog: &LanguageCatalog, active: &str) -> String {
    catalog
        .entries()
        .map(|entry| {
            let marker = if entry.code == active { "*" } else { " " };
            format!(
                "{} {:<4} {} ({})",
                marker, entry.code, entry.display_name, entry.english_name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Builds a [`ChatController`] from configuration and runs a
    //! readline-based loop that submits user input to it.

    use super::special_commands::{parse_special_command, print_help, SpecialCommand};
    use super::*;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `language` - Optional override for the configured default language
    pub async fn run_chat(config: Config, language: Option<String>) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let chat = ChatController::from_config(&config)?;
        if let Some(code) = language.as_deref() {
            chat.reset(code);
        }

        if !chat.client().is_available() {
            println!(
                "{}",
                "The assistant is not configured; replies will be apologies. Set WELLNESS_API_KEY or API_KEY."
                    .yellow()
            );
        }

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&chat);
        for message in chat.messages() {
            println!("{}\n", render_message(&message));
        }

        loop {
            match rl.readline(&format!("[{}] » ", chat.language())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::SwitchLanguage(code)) => {
                            switch_language(&chat, &code);
                            continue;
                        }
                        Ok(SpecialCommand::ListLanguages) => {
                            let listing = chat
                                .with_store(|store| render_languages(store.catalog(), store.language()));
                            println!("{}\n", listing);
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status(&chat);
                            continue;
                        }
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            println!("{}\n", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;

                    println!("{}", "bot is typing…".dimmed());
                    chat.send(trimmed).await;

                    if let Some(reply) = chat.messages().last() {
                        println!("{}\n", render_message(reply));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Take care of yourself. Goodbye!");
        Ok(())
    }

    fn switch_language(chat: &ChatController, code: &str) {
        let known = chat.with_store(|store| store.catalog().contains(code));
        if !known {
            println!(
                "{}",
                format!("Unknown language '{}', using the default greeting", code).yellow()
            );
        }
        chat.reset(code);
        if let Some(greeting) = chat.messages().first() {
            println!("{}\n", render_message(greeting));
        }
    }

    fn print_welcome_banner(chat: &ChatController) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║               Wellness Support Chat - Welcome!               ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "I'm not a medical professional. If you are in immediate danger, contact emergency services."
        );
        println!(
            "Language: {}   Type '/help' for available commands, 'exit' to quit\n",
            chat.language().bold()
        );
    }

    fn print_status(chat: &ChatController) {
        let provider = chat.client().provider_name().unwrap_or("unavailable");
        let (language, count) = chat.with_store(|store| {
            let entry = store.catalog().resolve(store.language());
            (
                format!("{} ({})", entry.display_name, entry.code),
                store.snapshot().len(),
            )
        });
        println!("Language: {}", language);
        println!("Provider: {}", provider);
        println!("Messages: {}\n", count);
    }
}

// One-shot command handler
pub mod ask {
    //! Send one message and print the reply.

    use super::*;

    /// Send `message` in a fresh session and print the bot's reply
    ///
    /// Exits successfully even when the provider fails; the printed reply is
    /// then the apology.
    pub async fn run_ask(config: Config, message: String, language: Option<String>) -> Result<()> {
        let chat = ChatController::from_config(&config)?;
        if let Some(code) = language.as_deref() {
            chat.reset(code);
        }

        let outcome = chat.send(&message).await;
        tracing::debug!("Send outcome: {:?}", outcome);

        match chat.messages().last() {
            Some(reply) if reply.sender == Sender::Bot && chat.messages().len() > 1 => {
                println!("{}", reply.text);
            }
            _ => println!("{}", "Nothing to send.".yellow()),
        }
        Ok(())
    }
}

// Language listing handler
pub mod languages {
    //! Print the language catalog.

    use super::*;

    /// Print configured languages, marking the default
    pub fn list_languages(config: &Config) -> Result<()> {
        let catalog = config.language_catalog()?;
        println!("{}", render_languages(&catalog, &config.chat.default_language));
        Ok(())
    }
}
