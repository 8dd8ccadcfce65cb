//! Conversation store for one chat session
//!
//! Holds the ordered, append-only message sequence, the in-flight flag and
//! the session generation. Every [`ConversationStore::reset`] starts a new
//! generation; a reply tagged with an older generation belongs to a session
//! that no longer exists.

use crate::chat::message::Message;
use crate::localization::LanguageCatalog;
use std::sync::Arc;
use tokio::sync::watch;

/// Identifies one incarnation of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Message sequence and pending-request flag for one session
#[derive(Debug)]
pub struct ConversationStore {
    catalog: Arc<LanguageCatalog>,
    language: String,
    generation: Generation,
    messages: Vec<Message>,
    in_flight: bool,
    revision: watch::Sender<u64>,
}

impl ConversationStore {
    /// Creates a store already seeded with the greeting for `language`
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use wellness_chat::chat::{ConversationStore, Sender};
    /// use wellness_chat::localization::LanguageCatalog;
    ///
    /// let store = ConversationStore::new(Arc::new(LanguageCatalog::builtin()), "hi");
    /// let snapshot = store.snapshot();
    /// assert_eq!(snapshot.len(), 1);
    /// assert_eq!(snapshot.iter().next().unwrap().sender, Sender::Bot);
    /// ```
    pub fn new(catalog: Arc<LanguageCatalog>, language: &str) -> Self {
        let (revision, _) = watch::channel(0);
        let mut store = Self {
            catalog,
            language: String::new(),
            generation: Generation(0),
            messages: Vec::new(),
            in_flight: false,
            revision,
        };
        store.reset(language);
        store
    }

    /// Starts a new session in `language`
    ///
    /// Discards every message, clears the in-flight flag and seeds the
    /// greeting for `language` (or the default language's greeting when the
    /// code is unknown). Returns the new generation.
    pub fn reset(&mut self, language: &str) -> Generation {
        self.generation = Generation(self.generation.0.wrapping_add(1));
        self.language = language.to_string();
        self.in_flight = false;
        self.messages.clear();
        self.messages
            .push(Message::bot(self.catalog.greeting(language)));

        tracing::info!(
            "Chat session reset: language={}, generation={}",
            self.language,
            self.generation.0
        );
        self.notify();
        self.generation
    }

    /// Adds a message to the end of the sequence
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.notify();
    }

    /// Toggles the pending-request flag
    pub fn set_in_flight(&mut self, in_flight: bool) {
        if self.in_flight != in_flight {
            self.in_flight = in_flight;
            self.notify();
        }
    }

    /// Read-only view of the messages in insertion order
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            messages: &self.messages,
        }
    }

    /// Whether a provider call is outstanding
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Current session generation
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Language code the session was last reset with
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Catalog used for greetings
    pub fn catalog(&self) -> &Arc<LanguageCatalog> {
        &self.catalog
    }

    /// Receiver that changes whenever the store is mutated
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision = revision.wrapping_add(1));
    }
}

/// Borrowed, restartable view over a session's messages
///
/// Iterating does not copy; call [`Snapshot::iter`] as often as needed.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    messages: &'a [Message],
}

impl<'a> Snapshot<'a> {
    /// Iterates the messages in insertion order
    pub fn iter(&self) -> std::slice::Iter<'a, Message> {
        self.messages.iter()
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the session has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Renders the conversation as `sender: text` lines joined by newlines
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use wellness_chat::chat::ConversationStore;
    /// use wellness_chat::localization::LanguageCatalog;
    ///
    /// let store = ConversationStore::new(Arc::new(LanguageCatalog::builtin()), "en");
    /// assert_eq!(
    ///     store.snapshot().transcript(),
    ///     "bot: Hello! How can I help you with your wellness today?"
    /// );
    /// ```
    pub fn transcript(&self) -> String {
        self.iter()
            .map(Message::transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Owned copy of the messages
    pub fn to_vec(&self) -> Vec<Message> {
        self.messages.to_vec()
    }
}

impl<'a> IntoIterator for Snapshot<'a> {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Sender;

    fn store(language: &str) -> ConversationStore {
        ConversationStore::new(Arc::new(LanguageCatalog::builtin()), language)
    }

    #[test]
    fn test_reset_seeds_greeting_for_every_language() {
        let catalog = LanguageCatalog::builtin();
        for entry in catalog.entries() {
            let store = store(&entry.code);
            let messages = store.snapshot().to_vec();
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].sender, Sender::Bot);
            assert_eq!(messages[0].text, entry.greeting);
        }
    }

    #[test]
    fn test_reset_unknown_language_uses_default_greeting() {
        let store = store("fr");
        let messages = store.snapshot().to_vec();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].text,
            "Hello! How can I help you with your wellness today?"
        );
        assert_eq!(store.language(), "fr");
    }

    #[test]
    fn test_reset_discards_messages_and_bumps_generation() {
        let mut store = store("en");
        let first = store.generation();
        store.append(Message::user("hello"));
        store.set_in_flight(true);

        let second = store.reset("te");
        assert!(second > first);
        assert_eq!(store.generation(), second);
        assert!(!store.in_flight());
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.language(), "te");
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = store("en");
        store.append(Message::user("one"));
        store.append(Message::bot("two"));
        store.append(Message::user("three"));

        let texts: Vec<&str> = store.snapshot().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[1..], ["one", "two", "three"]);
    }

    #[test]
    fn test_snapshot_is_restartable() {
        let mut store = store("en");
        store.append(Message::user("hi"));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.iter().count(), 2);
        assert_eq!(snapshot.iter().count(), 2);
        assert_eq!(snapshot.into_iter().count(), 2);
    }

    #[test]
    fn test_transcript_lines() {
        let mut store = store("en");
        store.append(Message::user("I feel tired"));
        assert_eq!(
            store.snapshot().transcript(),
            "bot: Hello! How can I help you with your wellness today?\nuser: I feel tired"
        );
    }

    #[test]
    fn test_mutations_notify_subscribers() {
        let mut store = store("en");
        let mut rx = store.subscribe();
        let before = *rx.borrow_and_update();

        store.append(Message::user("hi"));
        assert!(rx.has_changed().unwrap());
        let after_append = *rx.borrow_and_update();
        assert!(after_append > before);

        store.set_in_flight(false);
        assert!(!rx.has_changed().unwrap());

        store.set_in_flight(true);
        assert!(rx.has_changed().unwrap());
    }
}
