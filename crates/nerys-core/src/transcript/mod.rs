//! Append-only conversation transcript.
//!
//! The transcript is the ordered log of exchanged messages for one session.
//! It is owned exclusively by the session controller; there is no deletion or
//! in-place mutation, so no reader ever observes partial state.

mod message;

pub use message::{Message, MessageRole};

use chrono::Utc;

/// Ordered, append-only log of exchanged messages.
///
/// Invariant: for any two messages, the one appended earlier has an earlier
/// or equal timestamp.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message with the current time and returns a reference to it.
    pub fn append(&mut self, role: MessageRole, text: impl Into<String>) -> &Message {
        self.messages.push(Message {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        });
        // Safe to unwrap because we just pushed an element
        self.messages.last().unwrap()
    }

    /// Returns the last `n` messages *excluding* the most recently appended
    /// one, oldest first.
    ///
    /// This is the sliding history window sent alongside a new user message:
    /// the newest message travels as the request text, not as history.
    pub fn recent_history(&self, n: usize) -> &[Message] {
        let Some(prior) = self.messages.len().checked_sub(1) else {
            return &[];
        };
        let start = prior.saturating_sub(n);
        &self.messages[start..prior]
    }

    /// Number of messages in the transcript.
    pub fn count(&self) -> usize {
        self.messages.len()
    }

    /// The full log, for export.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    /// Text of the most recent user message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.text.as_str())
    }
}
