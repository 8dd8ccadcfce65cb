//! Integration tests for the chat session
//!
//! Covers the session rules end to end through `ChatController`:
//! - Greeting seeding on creation and reset
//! - Append-only growth and ordering
//! - One outstanding reply at a time
//! - Failure fallback to the localized apology
//! - Dropping replies that resolve after a language change

mod common;

use common::{controller_with, ScriptedProvider};
use wellness_chat::chat::{Rejection, SendOutcome, Sender};
use wellness_chat::localization::LanguageCatalog;

#[test]
fn test_new_session_starts_with_greeting_for_each_language() {
    let catalog = LanguageCatalog::builtin();
    for code in ["en", "hi", "ta", "te"] {
        let chat = controller_with(ScriptedProvider::replying(), code);
        let messages = chat.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[0].text, catalog.greeting(code));
        assert!(!chat.in_flight());
    }
}

#[tokio::test]
async fn test_each_cycle_appends_user_then_bot() {
    let provider = ScriptedProvider::replying();
    let chat = controller_with(provider.clone(), "en");

    let mut previous = chat.messages();
    for input in ["I feel stressed", "exams are soon", "thanks"] {
        assert_eq!(chat.send(input).await, SendOutcome::Completed);

        let current = chat.messages();
        assert_eq!(current.len(), previous.len() + 2);
        assert_eq!(current[..previous.len()], previous[..]);

        let user = &current[current.len() - 2];
        let bot = &current[current.len() - 1];
        assert_eq!(user.sender, Sender::User);
        assert_eq!(user.text, input);
        assert_eq!(bot.sender, Sender::Bot);
        previous = current;
    }

    assert_eq!(previous.len(), 7);
    assert_eq!(provider.calls(), 3);
}

#[tokio::test]
async fn test_transcript_contains_exactly_prior_messages() {
    let provider = ScriptedProvider::replying();
    let chat = controller_with(provider.clone(), "en");
    let greeting = LanguageCatalog::builtin().greeting("en").to_string();

    chat.send("first").await;
    chat.send("second").await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);

    assert_eq!(requests[0].message, "first");
    assert!(requests[0]
        .system_instruction
        .ends_with(&format!("Previous conversation: bot: {}", greeting)));

    assert_eq!(requests[1].message, "second");
    assert!(requests[1].system_instruction.ends_with(&format!(
        "Previous conversation: bot: {}\nuser: first\nbot: reply #1: first",
        greeting
    )));
    assert!(!requests[1].system_instruction.contains("user: second"));
}

#[tokio::test]
async fn test_empty_input_is_ignored() {
    let provider = ScriptedProvider::replying();
    let chat = controller_with(provider.clone(), "ta");

    for input in ["", "   ", "\n\t"] {
        assert_eq!(
            chat.send(input).await,
            SendOutcome::Rejected(Rejection::EmptyInput)
        );
    }

    assert_eq!(chat.messages().len(), 1);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_second_send_while_in_flight_is_rejected() {
    let provider = ScriptedProvider::gated();
    let chat = controller_with(provider.clone(), "en");

    let first = tokio::spawn({
        let chat = chat.clone();
        async move { chat.send("hello").await }
    });
    provider.wait_started().await;

    assert!(chat.in_flight());
    assert_eq!(
        chat.send("are you there?").await,
        SendOutcome::Rejected(Rejection::InFlight)
    );
    assert_eq!(provider.calls(), 1);
    assert_eq!(chat.messages().len(), 2);

    provider.release();
    assert_eq!(first.await.unwrap(), SendOutcome::Completed);

    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, "reply #1: hello");
    assert!(!chat.in_flight());
}

#[tokio::test]
async fn test_provider_failure_appends_localized_apology() {
    let catalog = LanguageCatalog::builtin();

    for code in ["en", "hi"] {
        let chat = controller_with(ScriptedProvider::failing(), code);
        assert_eq!(chat.send("hello").await, SendOutcome::Completed);

        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].sender, Sender::Bot);
        assert_eq!(messages[2].text, catalog.apology(code));
        assert!(!chat.in_flight());
    }
}

#[tokio::test]
async fn test_reply_after_language_change_is_discarded() {
    let provider = ScriptedProvider::gated();
    let chat = controller_with(provider.clone(), "en");

    let pending = tokio::spawn({
        let chat = chat.clone();
        async move { chat.send("hello").await }
    });
    provider.wait_started().await;

    chat.reset("hi");
    assert!(!chat.in_flight());

    provider.release();
    assert_eq!(pending.await.unwrap(), SendOutcome::Discarded);

    let messages = chat.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, LanguageCatalog::builtin().greeting("hi"));
    assert!(!chat.in_flight());

    // The new session accepts input right away.
    provider.release();
    assert_eq!(chat.send("नमस्ते").await, SendOutcome::Completed);
    let messages = chat.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].text, "नमस्ते");
    assert!(provider.requests()[1]
        .system_instruction
        .contains("You MUST respond in Hindi."));
}

#[tokio::test]
async fn test_subscribers_see_send_cycle() {
    let chat = controller_with(ScriptedProvider::replying(), "te");
    let mut revisions = chat.subscribe();
    revisions.borrow_and_update();

    chat.send("hello").await;
    assert!(revisions.has_changed().unwrap());

    revisions.borrow_and_update();
    chat.send("").await;
    assert!(!revisions.has_changed().unwrap());
}
