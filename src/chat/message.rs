//! Chat message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The student typing into the chat
    User,
    /// The support assistant (greeting, replies and apologies)
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Bot => write!(f, "bot"),
        }
    }
}

/// One entry in a conversation session
///
/// Messages are immutable once created; the session only ever appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier within the session
    pub id: Uuid,
    /// Message text
    pub text: String,
    /// Author
    pub sender: Sender,
    /// Placeholder flag for a reply that has not arrived yet
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pending: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a user-authored message
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::chat::{Message, Sender};
    ///
    /// let msg = Message::user("I can't focus");
    /// assert_eq!(msg.sender, Sender::User);
    /// assert!(!msg.pending);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Creates a bot-authored message
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            pending: false,
            created_at: Utc::now(),
        }
    }

    /// Renders the message as a transcript line (`sender: text`)
    ///
    /// # Examples
    ///
    /// ```
    /// use wellness_chat::chat::Message;
    ///
    /// assert_eq!(Message::bot("Hello!").transcript_line(), "bot: Hello!");
    /// ```
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.sender, self.text)
    }
}
