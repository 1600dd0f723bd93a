//! Transport layer for the Nerys widget: wire DTOs for the assistant
//! service plus the reqwest-backed client.

mod http_client;
mod transport;
pub mod wire;

pub use http_client::HttpAssistantClient;
pub use transport::AssistantTransport;
pub use wire::{ChatRequest, ChatResponse, DocumentRequest, LeadSubmission, TranscriptEntry};
