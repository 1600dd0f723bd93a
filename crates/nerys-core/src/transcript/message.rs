//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
///
/// Serialized lowercase to match the service wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the user.
    User,
    /// Message from the assistant.
    Assistant,
}

/// A single message in the conversation transcript.
///
/// Immutable once created; ordering within the transcript is insertion order
/// and is semantically meaningful (it is the order sent back to the service).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The message text as exchanged with the service.
    pub text: String,
    /// Timestamp when the message was appended.
    pub timestamp: DateTime<Utc>,
}
