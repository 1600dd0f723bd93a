//! Wire DTOs for the assistant service.
//!
//! Field names follow the service contract exactly; conversion helpers keep
//! the controller working in domain types.

use chrono::{DateTime, Utc};
use nerys_core::profile::Profile;
use nerys_core::property::PropertyResult;
use nerys_core::transcript::{Message, MessageRole};
use serde::{Deserialize, Serialize};

/// One prior exchange entry in the chat request's sliding history window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistoryItem {
    pub role: MessageRole,
    pub content: String,
}

impl From<&Message> for ChatHistoryItem {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.text.clone(),
        }
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub text: String,
    pub lang: String,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub history: Vec<ChatHistoryItem>,
}

impl ChatRequest {
    /// Assembles a request from domain state.
    pub fn from_parts(
        text: impl Into<String>,
        lang: impl Into<String>,
        limit: u32,
        profile: &Profile,
        history: &[Message],
    ) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
            limit,
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            history: history.iter().map(ChatHistoryItem::from).collect(),
        }
    }
}

/// Body of the `POST /chat` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub results: Vec<PropertyResult>,
    #[serde(default)]
    pub quick_replies: Vec<String>,
}

impl ChatResponse {
    /// Wraps a raw-text body as a plain answer (non-JSON fallback path).
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            answer: text.into(),
            ..Default::default()
        }
    }
}

/// Body of `POST /leads`.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSubmission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub source: String,
}

impl LeadSubmission {
    pub const SOURCE_CHATBOT: &'static str = "chatbot";
}

/// One transcript entry in the document request.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub role: MessageRole,
    pub text: String,
    pub ts: DateTime<Utc>,
}

impl From<&Message> for TranscriptEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            text: message.text.clone(),
            ts: message.timestamp,
        }
    }
}

/// Body of `POST /pdf/summary`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub messages: Vec<TranscriptEntry>,
}

impl DocumentRequest {
    /// Assembles an export payload from the full transcript.
    pub fn from_transcript(profile: &Profile, messages: &[Message]) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            messages: messages.iter().map(TranscriptEntry::from).collect(),
        }
    }
}
