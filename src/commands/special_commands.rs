//! Special commands parser for the interactive chat
//!
//! Special commands let the user change the session language, list the
//! available languages, check the session status, get help or leave.
//! Commands are prefixed with `/` and are case-insensitive; language codes
//! are passed through lowercased.

use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// These commands act on the session instead of being sent to the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Reset the session in another language
    SwitchLanguage(String),

    /// List the configured languages
    ListLanguages,

    /// Show language, provider and message count
    ShowStatus,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input to the assistant
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not
/// a valid command, and `CommandError::MissingArgument` if `/language` is
/// given no code.
///
/// # Examples
///
/// ```
/// use wellness_chat::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/language HI").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchLanguage("hi".to_string()));
///
/// let cmd = parse_special_command("I feel anxious").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    let mut parts = lower.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let argument = parts.next();

    match command {
        "/language" | "/lang" => match argument {
            Some(code) => Ok(SpecialCommand::SwitchLanguage(code.to_string())),
            None => Err(CommandError::MissingArgument {
                command: command.to_string(),
                usage: "/language <code>".to_string(),
            }),
        },
        "/languages" => Ok(SpecialCommand::ListLanguages),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands
================

  /language <code>  - Start a new conversation in another language
  /lang <code>      - Same as /language
  /languages        - List available languages
  /status           - Show current language and provider
  /help             - Show this help message
  /exit, /quit      - Leave the chat

Anything else is sent to the wellness assistant.
"#
    );
}
