//! Render commands emitted by the session controller.
//!
//! The surface (DOM binding, TUI, test harness) subscribes to the command
//! stream and applies each instruction in order. Commands are self-contained
//! and idempotent with respect to panel visibility: the controller emits them
//! whether or not the panel is currently shown.

use nerys_core::markup::Block;
use nerys_core::property::PropertyResult;
use nerys_core::transcript::MessageRole;
use serde::{Deserialize, Serialize};

/// One instruction for the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Show or hide the chat panel.
    PanelVisible { visible: bool },
    /// Append a message bubble. `blocks` is the safe structured rendering of
    /// `text` produced by the markup renderer.
    AppendMessage {
        role: MessageRole,
        text: String,
        blocks: Vec<Block>,
    },
    /// Toggle the typing indicator.
    SetTyping { on: bool },
    /// Replace the dynamic quick-reply row in full (empty clears it).
    SetQuickReplies { labels: Vec<String> },
    /// Render property result cards under the latest answer.
    ShowPropertyResults { results: Vec<PropertyResult> },
    /// Open the modal contact-info form.
    ShowLeadPrompt,
    /// Close the modal contact-info form.
    DismissLeadPrompt,
    /// Inline validation error on the contact-info form.
    LeadFormError { message: String },
    /// Toast-style informational notice.
    Notice { message: String },
    /// Persist the exported document locally under the given name.
    SaveDocument { file_name: String, bytes: Vec<u8> },
    /// Open the user's mail client with a prefilled message.
    ComposeEmail {
        to: String,
        subject: String,
        body: String,
    },
}
