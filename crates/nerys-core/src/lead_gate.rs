//! Lead-capture gating policy.
//!
//! Decides when the contact-info prompt should appear. The policy is pure:
//! the controller reports the triggering milestone and the current profile
//! completeness, and updates the latches when the prompt is actually shown
//! or dismissed.

/// The session milestone that may warrant showing the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadTrigger {
    /// The panel was opened.
    PanelOpened,
    /// The user is sending their first message of the session.
    FirstMessage,
    /// A transcript export was requested.
    ExportRequested,
}

/// Per-session lead prompt state.
///
/// The prompt fires exactly once at panel-open time regardless of profile
/// completeness (first-touch capture), and again at the first message or an
/// export request while the profile is still incomplete. It is never shown
/// twice concurrently.
#[derive(Debug, Clone, Default)]
pub struct LeadGate {
    opened_prompt_shown: bool,
    prompt_visible: bool,
}

impl LeadGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the prompt should be shown for this trigger.
    pub fn should_prompt(&self, trigger: LeadTrigger, profile_complete: bool) -> bool {
        if self.prompt_visible {
            // Re-triggering while already shown is a no-op.
            return false;
        }
        match trigger {
            LeadTrigger::PanelOpened => !self.opened_prompt_shown,
            LeadTrigger::FirstMessage | LeadTrigger::ExportRequested => !profile_complete,
        }
    }

    /// Records that the prompt is now visible.
    pub fn note_shown(&mut self, trigger: LeadTrigger) {
        if trigger == LeadTrigger::PanelOpened {
            self.opened_prompt_shown = true;
        }
        self.prompt_visible = true;
    }

    /// Records that the prompt was dismissed (submission or background
    /// dismissal; neither re-arms the panel-open trigger).
    pub fn note_dismissed(&mut self) {
        self.prompt_visible = false;
    }

    /// Whether the prompt is currently on screen.
    pub fn is_visible(&self) -> bool {
        self.prompt_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_open_prompts_once_regardless_of_completeness() {
        let mut gate = LeadGate::new();
        assert!(gate.should_prompt(LeadTrigger::PanelOpened, true));
        gate.note_shown(LeadTrigger::PanelOpened);
        gate.note_dismissed();
        assert!(!gate.should_prompt(LeadTrigger::PanelOpened, false));
    }

    #[test]
    fn test_first_message_prompts_only_when_incomplete() {
        let gate = LeadGate::new();
        assert!(gate.should_prompt(LeadTrigger::FirstMessage, false));
        assert!(!gate.should_prompt(LeadTrigger::FirstMessage, true));
    }

    #[test]
    fn test_export_prompts_only_when_incomplete() {
        let gate = LeadGate::new();
        assert!(gate.should_prompt(LeadTrigger::ExportRequested, false));
        assert!(!gate.should_prompt(LeadTrigger::ExportRequested, true));
    }

    #[test]
    fn test_retrigger_while_visible_is_noop() {
        let mut gate = LeadGate::new();
        gate.note_shown(LeadTrigger::PanelOpened);
        assert!(!gate.should_prompt(LeadTrigger::ExportRequested, false));
        gate.note_dismissed();
        assert!(gate.should_prompt(LeadTrigger::ExportRequested, false));
    }
}
