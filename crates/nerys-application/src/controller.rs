//! The conversation session controller.
//!
//! Orchestrates the transcript, profile store, lead gate and transport in
//! response to surface events, and publishes the resulting render commands on
//! an unbounded channel. All state lives behind a single async mutex; the
//! lock is never held across a network call, so further surface events (close,
//! dismiss, a second send) stay responsive while a call is outstanding.

use crate::render::RenderCommand;
use chrono::Local;
use nerys_core::config::WidgetConfig;
use nerys_core::i18n::Language;
use nerys_core::lead_gate::{LeadGate, LeadTrigger};
use nerys_core::markup;
use nerys_core::profile::{LeadForm, Profile, ProfileRepository};
use nerys_core::transcript::{Message, MessageRole, Transcript};
use nerys_interaction::wire::{ChatRequest, DocumentRequest, LeadSubmission};
use nerys_interaction::AssistantTransport;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

/// Where the current chat exchange stands.
///
/// `send()` is a no-op while an exchange is in `Sending` or
/// `AwaitingResponse`: the single-flight guard against duplicate outbound
/// requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExchangeState {
    Idle,
    Sending,
    AwaitingResponse,
}

/// Controller-internal session state. Never persisted.
struct SessionState {
    transcript: Transcript,
    profile: Profile,
    lead_gate: LeadGate,
    language: Language,
    lang_code: String,
    panel_open: bool,
    exchange: ExchangeState,
    export_in_flight: bool,
    export_disabled_notified: bool,
    first_message_sent: bool,
}

/// Top-level state machine for one widget session.
///
/// Constructed once per embedding with its configuration, transport and
/// profile repository (dependency injection, no ambient globals). Handlers
/// run to completion between suspension points; suspension occurs only at
/// network-call boundaries.
pub struct SessionController {
    config: WidgetConfig,
    session_id: String,
    transport: Arc<dyn AssistantTransport>,
    profile_repository: Arc<dyn ProfileRepository>,
    state: Mutex<SessionState>,
    commands: mpsc::UnboundedSender<RenderCommand>,
}

impl SessionController {
    /// Creates a controller and the render command stream the surface should
    /// consume.
    ///
    /// The persisted profile is loaded here, once; a load failure degrades to
    /// an empty profile and is logged. An optional greeting is seeded into
    /// the transcript as the first assistant message so it travels with the
    /// history and any later export.
    pub async fn new(
        config: WidgetConfig,
        transport: Arc<dyn AssistantTransport>,
        profile_repository: Arc<dyn ProfileRepository>,
    ) -> (Self, mpsc::UnboundedReceiver<RenderCommand>) {
        let profile = match profile_repository.load().await {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(err) => {
                tracing::warn!(target: "session", error = %err, "profile load failed, starting empty");
                Profile::default()
            }
        };

        let mut transcript = Transcript::new();
        if let Some(greeting) = &config.greeting {
            transcript.append(MessageRole::Assistant, greeting.clone());
        }

        let session_id = Uuid::new_v4().to_string();
        tracing::debug!(target: "session", %session_id, lang = %config.language, "session created");

        let state = SessionState {
            transcript,
            profile,
            lead_gate: LeadGate::new(),
            language: Language::from_code(&config.language),
            lang_code: config.language.clone(),
            panel_open: false,
            exchange: ExchangeState::Idle,
            export_in_flight: false,
            export_disabled_notified: false,
            first_message_sent: false,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            config,
            session_id,
            transport,
            profile_repository,
            state: Mutex::new(state),
            commands: tx,
        };
        (controller, rx)
    }

    /// Opens the panel. The contact-info prompt fires here exactly once per
    /// session, regardless of profile completeness.
    pub async fn open(&self) {
        let mut state = self.state.lock().await;
        state.panel_open = true;
        self.emit(RenderCommand::PanelVisible { visible: true });

        if self.config.features.inline_lead_prompt
            && state
                .lead_gate
                .should_prompt(LeadTrigger::PanelOpened, state.profile.is_complete())
        {
            state.lead_gate.note_shown(LeadTrigger::PanelOpened);
            self.emit(RenderCommand::ShowLeadPrompt);
        }
    }

    /// Closes the panel. In-flight calls are not cancelled; their eventual
    /// transcript append is emitted regardless of visibility.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.panel_open = false;
        self.emit(RenderCommand::PanelVisible { visible: false });
    }

    /// Switches the forwarded language code mid-session (language selector
    /// affordance).
    pub async fn set_language(&self, code: &str) {
        if !self.config.features.language_selector {
            tracing::debug!(target: "session", "language selector disabled, ignoring switch");
            return;
        }
        let mut state = self.state.lock().await;
        state.lang_code = code.trim().to_string();
        state.language = Language::from_code(code);
    }

    /// Sends a user message through a `/chat` exchange.
    ///
    /// No-op for empty or whitespace-only text and while another exchange is
    /// in flight. On failure the localized fallback (carrying the error
    /// detail) is appended in place of a service answer; either way the
    /// exchange returns to idle and is never retried automatically.
    pub async fn send(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let (request, language) = {
            let mut state = self.state.lock().await;
            if state.exchange != ExchangeState::Idle {
                tracing::debug!(target: "session", "send ignored: exchange already in flight");
                return;
            }
            state.exchange = ExchangeState::Sending;

            let message = state.transcript.append(MessageRole::User, trimmed);
            let append = append_command(message);
            self.emit(append);
            self.emit(RenderCommand::SetTyping { on: true });

            let first = !state.first_message_sent;
            state.first_message_sent = true;
            if first
                && self.config.features.inline_lead_prompt
                && state
                    .lead_gate
                    .should_prompt(LeadTrigger::FirstMessage, state.profile.is_complete())
            {
                state.lead_gate.note_shown(LeadTrigger::FirstMessage);
                self.emit(RenderCommand::ShowLeadPrompt);
            }

            let history = state.transcript.recent_history(self.config.history_window);
            let request = ChatRequest::from_parts(
                trimmed,
                &state.lang_code,
                self.config.result_limit,
                &state.profile,
                history,
            );
            state.exchange = ExchangeState::AwaitingResponse;
            (request, state.language)
        };

        let outcome = self.transport.send_chat(request).await;

        let mut state = self.state.lock().await;
        state.exchange = ExchangeState::Idle;
        self.emit(RenderCommand::SetTyping { on: false });

        match outcome {
            Ok(response) => {
                let message = state
                    .transcript
                    .append(MessageRole::Assistant, response.answer);
                let append = append_command(message);
                self.emit(append);
                if self.config.features.dynamic_quick_replies {
                    // Replace in full; an empty list clears the row.
                    self.emit(RenderCommand::SetQuickReplies {
                        labels: response.quick_replies,
                    });
                }
                if !response.results.is_empty() {
                    self.emit(RenderCommand::ShowPropertyResults {
                        results: response.results,
                    });
                }
            }
            Err(err) => {
                tracing::warn!(target: "session", session_id = %self.session_id, error = %err, "chat exchange failed");
                let fallback = language.chat_fallback(&err.to_string());
                let message = state.transcript.append(MessageRole::Assistant, fallback);
                let append = append_command(message);
                self.emit(append);
            }
        }
    }

    /// A quick-reply click is just a send of its label.
    pub async fn quick_reply(&self, label: &str) {
        self.send(label).await;
    }

    /// Requests a transcript export.
    ///
    /// Refused without a network call while the conversation is too short or
    /// (when the prompt affordance exists) the profile is incomplete. A 404
    /// from the service means the feature is disabled and is surfaced at most
    /// once per session; other failures surface a retry notice every time.
    pub async fn request_export(&self) {
        let (request, language) = {
            let mut state = self.state.lock().await;
            if state.export_in_flight {
                tracing::debug!(target: "session", "export ignored: already in flight");
                return;
            }
            if state.transcript.count() < 3 {
                self.emit(RenderCommand::Notice {
                    message: state.language.export_too_short().to_string(),
                });
                return;
            }
            if self.config.features.inline_lead_prompt && !state.profile.is_complete() {
                if state
                    .lead_gate
                    .should_prompt(LeadTrigger::ExportRequested, false)
                {
                    state.lead_gate.note_shown(LeadTrigger::ExportRequested);
                    self.emit(RenderCommand::ShowLeadPrompt);
                }
                return;
            }
            state.export_in_flight = true;
            (
                DocumentRequest::from_transcript(&state.profile, state.transcript.all()),
                state.language,
            )
        };

        let outcome = self.transport.request_document(request).await;

        let mut state = self.state.lock().await;
        state.export_in_flight = false;

        match outcome {
            Ok(bytes) => {
                let file_name = export_file_name();
                self.emit(RenderCommand::Notice {
                    message: language.document_saved(&file_name),
                });
                self.emit(RenderCommand::SaveDocument { file_name, bytes });
            }
            Err(err) if err.http_status() == Some(404) => {
                tracing::warn!(target: "session", "document export disabled on service");
                if !state.export_disabled_notified {
                    state.export_disabled_notified = true;
                    self.emit(RenderCommand::Notice {
                        message: language.export_disabled().to_string(),
                    });
                }
            }
            Err(err) => {
                tracing::warn!(target: "session", error = %err, "document export failed");
                self.emit(RenderCommand::Notice {
                    message: language.export_failed().to_string(),
                });
            }
        }
    }

    /// Handles submission of the contact-info form.
    ///
    /// An empty email is rejected with a validation error and nothing else
    /// changes. Otherwise the profile is replaced wholesale, persisted, and
    /// best-effort forwarded to the lead endpoint; neither failure blocks
    /// dismissal of the prompt.
    pub async fn submit_lead(&self, form: LeadForm) {
        if form.email.trim().is_empty() {
            let message = {
                let state = self.state.lock().await;
                state.language.lead_email_required().to_string()
            };
            self.emit(RenderCommand::LeadFormError { message });
            return;
        }

        let profile = form.to_profile();
        let (first_name, last_name) = form.split_name();

        {
            let mut state = self.state.lock().await;
            state.profile = profile.clone();
            state.lead_gate.note_dismissed();
        }
        self.emit(RenderCommand::DismissLeadPrompt);

        if let Err(err) = self.profile_repository.save(&profile).await {
            tracing::warn!(target: "session", error = %err, "profile persistence failed");
        }

        let submission = LeadSubmission {
            first_name,
            last_name,
            email: profile.email.clone().unwrap_or_default(),
            phone: profile.phone.clone(),
            source: LeadSubmission::SOURCE_CHATBOT.to_string(),
        };
        if let Err(err) = self.transport.submit_lead(submission).await {
            tracing::warn!(target: "session", session_id = %self.session_id, error = %err, "lead forwarding failed");
        }
    }

    /// Background dismissal of the contact-info prompt. The profile store is
    /// untouched.
    pub async fn dismiss_lead_prompt(&self) {
        let mut state = self.state.lock().await;
        state.lead_gate.note_dismissed();
        self.emit(RenderCommand::DismissLeadPrompt);
    }

    /// Contact-agent affordance: prefill an email to the sales inbox with the
    /// profile fields and the most recent user message.
    pub async fn contact_agent(&self) {
        let state = self.state.lock().await;
        let profile = &state.profile;
        let body = format!(
            "Name: {}\nEmail: {}\nPhone: {}\n\nRecent message: {}",
            profile.name.as_deref().unwrap_or("-"),
            profile.email.as_deref().unwrap_or("-"),
            profile.phone.as_deref().unwrap_or("-"),
            state.transcript.last_user_text().unwrap_or("-"),
        );
        self.emit(RenderCommand::ComposeEmail {
            to: self.config.sales_email.clone(),
            subject: "Chatbot Lead – Nerys".to_string(),
            body,
        });
    }

    /// Whether the panel is currently open.
    pub async fn is_open(&self) -> bool {
        self.state.lock().await.panel_open
    }

    fn emit(&self, command: RenderCommand) {
        if self.commands.send(command).is_err() {
            // Surface went away; rendering is suppressed, state marches on.
            tracing::debug!(target: "session", "render sink dropped, command discarded");
        }
    }
}

fn append_command(message: &Message) -> RenderCommand {
    RenderCommand::AppendMessage {
        role: message.role,
        text: message.text.clone(),
        blocks: markup::render(&message.text),
    }
}

/// Deterministic export file name derived from the current date.
fn export_file_name() -> String {
    format!("nerys-chat-summary-{}.pdf", Local::now().format("%Y-%m-%d"))
}
