//! Transport contract for the assistant service.

use crate::wire::{ChatRequest, ChatResponse, DocumentRequest, LeadSubmission};
use async_trait::async_trait;
use nerys_core::error::Result;

/// Outbound calls to the remote assistant/search/lead/PDF service.
///
/// Implementations bound every call by the configured timeout and classify
/// failures into `NerysError::Timeout` / `Http` / `Parse`. Callers own the
/// recovery policy; nothing here retries.
#[async_trait]
pub trait AssistantTransport: Send + Sync {
    /// `POST /chat`: one user message plus the sliding history window.
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// `POST /pdf/summary`: full transcript, returns the document bytes.
    async fn request_document(&self, request: DocumentRequest) -> Result<Vec<u8>>;

    /// `POST /leads`: fire-and-forget contact record forwarding.
    async fn submit_lead(&self, submission: LeadSubmission) -> Result<()>;
}
