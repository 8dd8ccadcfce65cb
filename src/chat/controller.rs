//! Chat controller: drives one send cycle at a time
//!
//! A send cycle is `Idle -> Sending -> Idle`. Admission is decided under the
//! store lock: empty input and sends while a reply is outstanding are
//! rejected on the spot rather than queued, so at most one provider call is
//! ever in progress per session. The lock is never held across the provider
//! call.
//!
//! A language change resets the session while a call may still be running.
//! Each call remembers the generation it was issued under and its reply is
//! dropped if the session has moved on by the time it resolves.

use crate::chat::client::ResponseClient;
use crate::chat::message::Message;
use crate::chat::store::{ConversationStore, Generation};
use crate::config::Config;
use crate::error::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Why a send was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Input was empty after trimming
    EmptyInput,
    /// A reply is still outstanding for this session
    InFlight,
}

/// Result of [`ChatController::send`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// User message and reply were both appended
    Completed,
    /// Nothing happened
    Rejected(Rejection),
    /// The session was reset while waiting; the reply was dropped
    Discarded,
}

/// Orchestrates store and response client for one chat session
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct ChatController {
    store: Arc<Mutex<ConversationStore>>,
    client: Arc<ResponseClient>,
    max_message_chars: usize,
}

impl ChatController {
    /// Creates a controller whose session starts in `language`
    pub fn new(client: ResponseClient, language: &str, max_message_chars: usize) -> Self {
        let store = ConversationStore::new(client.catalog().clone(), language);
        Self {
            store: Arc::new(Mutex::new(store)),
            client: Arc::new(client),
            max_message_chars,
        }
    }

    /// Builds catalog, provider and session from configuration
    ///
    /// A provider that cannot be constructed does not fail this call; the
    /// session then answers every message with the apology.
    ///
    /// # Errors
    ///
    /// Returns error if the configured extra languages are invalid
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = Arc::new(config.language_catalog()?);
        let client = ResponseClient::from_config(&config.provider, catalog);
        Ok(Self::new(
            client,
            &config.chat.default_language,
            config.chat.max_message_chars,
        ))
    }

    /// Submit user input and wait for the reply
    ///
    /// Empty input or a send while another is outstanding does nothing.
    /// Otherwise the trimmed input is appended as a user message, the
    /// provider is asked for a reply with the conversation as it stood
    /// before that message, and the reply (or apology) is appended as a bot
    /// message unless the session was reset in the meantime.
    pub async fn send(&self, raw_input: &str) -> SendOutcome {
        let text = raw_input.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring empty chat input");
            return SendOutcome::Rejected(Rejection::EmptyInput);
        }
        let text = truncate_chars(text, self.max_message_chars);

        let (transcript, language, generation) = {
            let mut store = self.lock();
            if store.in_flight() {
                tracing::warn!("Rejecting chat input while a reply is outstanding");
                return SendOutcome::Rejected(Rejection::InFlight);
            }

            let transcript = store.snapshot().transcript();
            store.append(Message::user(text.clone()));
            store.set_in_flight(true);
            (transcript, store.language().to_string(), store.generation())
        };

        let mut guard = InFlightGuard {
            store: &self.store,
            generation,
            armed: true,
        };

        let reply = self.client.respond(&transcript, &text, &language).await;

        let mut store = self.lock();
        guard.armed = false;
        if store.generation() != generation {
            tracing::warn!(
                "Discarding reply from session generation {} (current {})",
                generation.value(),
                store.generation().value()
            );
            return SendOutcome::Discarded;
        }

        store.append(Message::bot(reply));
        store.set_in_flight(false);
        SendOutcome::Completed
    }

    /// Start a new session in `language`, discarding the current one
    pub fn reset(&self, language: &str) -> Generation {
        self.lock().reset(language)
    }

    /// Copy of the current messages in display order
    pub fn messages(&self) -> Vec<Message> {
        self.lock().snapshot().to_vec()
    }

    /// Run `f` against the store without copying the messages
    pub fn with_store<R>(&self, f: impl FnOnce(&ConversationStore) -> R) -> R {
        f(&self.lock())
    }

    /// Whether a reply is outstanding (input should be disabled)
    pub fn in_flight(&self) -> bool {
        self.lock().in_flight()
    }

    /// Active language code
    pub fn language(&self) -> String {
        self.lock().language().to_string()
    }

    /// Receiver that changes on every append, reset and in-flight toggle
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.lock().subscribe()
    }

    /// The response client behind this session
    pub fn client(&self) -> &ResponseClient {
        &self.client
    }

    fn lock(&self) -> MutexGuard<'_, ConversationStore> {
        lock_store(&self.store)
    }
}

fn lock_store(store: &Mutex<ConversationStore>) -> MutexGuard<'_, ConversationStore> {
    // The store is left consistent at every await-free step, so a poisoned
    // lock still guards valid data.
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-flight flag if a send future is dropped mid-call
struct InFlightGuard<'a> {
    store: &'a Mutex<ConversationStore>,
    generation: Generation,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut store = lock_store(self.store);
        if store.generation() == self.generation {
            tracing::debug!("Send cancelled before the reply arrived");
            store.set_in_flight(false);
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            tracing::warn!("Truncating chat input to {} characters", max_chars);
            text[..byte_index].to_string()
        }
        None => text.to_string(),
    }
}
