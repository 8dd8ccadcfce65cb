//! Wellness support chat
//!
//! - `message`: message and sender types
//! - `store`: per-session message sequence, in-flight flag and generation
//! - `client`: provider request shaping and failure-to-apology translation
//! - `controller`: the send cycle and session resets

pub mod client;
pub mod controller;
pub mod message;
pub mod store;

pub use client::ResponseClient;
pub use controller::{ChatController, Rejection, SendOutcome};
pub use message::{Message, Sender};
pub use store::{ConversationStore, Generation, Snapshot};
