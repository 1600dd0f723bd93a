//! HTTP implementation of the assistant transport.
//!
//! One reqwest client per widget instance, timeout baked into the client so
//! every call shares the same bound. Responses are interpreted by declared
//! content type: JSON bodies are parsed as structured data, anything else is
//! opaque binary (documents) or raw text (fallback answers).

use crate::transport::AssistantTransport;
use crate::wire::{ChatRequest, ChatResponse, DocumentRequest, LeadSubmission};
use async_trait::async_trait;
use nerys_core::config::WidgetConfig;
use nerys_core::error::{NerysError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;

/// Transport implementation backed by the remote HTTP service.
#[derive(Clone)]
pub struct HttpAssistantClient {
    client: Client,
    api_base: String,
}

impl HttpAssistantClient {
    /// Builds a client from widget configuration.
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| NerysError::config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Issues a POST and normalizes transport-level failures.
    async fn post_json<B: serde::Serialize>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            tracing::debug!(target: "transport", %url, status = status.as_u16(), "non-success response");
            return Err(NerysError::http(status.as_u16(), body_text));
        }

        Ok(response)
    }
}

#[async_trait]
impl AssistantTransport for HttpAssistantClient {
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let response = self.post_json("/chat", &request).await?;

        if is_json(&response) {
            let parsed = response
                .json::<ChatResponse>()
                .await
                .map_err(|err| NerysError::parse(format!("unexpected /chat body: {err}")))?;
            Ok(parsed)
        } else {
            // Non-JSON success body: treat the raw text as the answer.
            let text = response.text().await.map_err(classify_request_error)?;
            Ok(ChatResponse::from_raw_text(text))
        }
    }

    async fn request_document(&self, request: DocumentRequest) -> Result<Vec<u8>> {
        let response = self.post_json("/pdf/summary", &request).await?;
        let bytes = response.bytes().await.map_err(classify_request_error)?;
        Ok(bytes.to_vec())
    }

    async fn submit_lead(&self, submission: LeadSubmission) -> Result<()> {
        self.post_json("/leads", &submission).await?;
        Ok(())
    }
}

/// Maps reqwest failures onto the transport taxonomy. Exceeding the client
/// timeout cancels the in-flight call and surfaces as `Timeout`.
fn classify_request_error(err: reqwest::Error) -> NerysError {
    if err.is_timeout() {
        NerysError::Timeout
    } else if err.is_decode() {
        NerysError::parse(err.to_string())
    } else {
        NerysError::internal(format!("request failed: {err}"))
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}
