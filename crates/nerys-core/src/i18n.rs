//! Localized user-facing strings.
//!
//! The core performs no language detection: the embedder supplies a code and
//! it is forwarded to the service verbatim. This module only maps that code
//! onto the handful of messages the controller produces locally.

use serde::{Deserialize, Serialize};

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Si,
    Ta,
}

impl Language {
    /// Maps a caller-supplied code onto a supported language. Unknown codes
    /// fall back to English.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        if code.starts_with("si") {
            Language::Si
        } else if code.starts_with("ta") {
            Language::Ta
        } else {
            Language::En
        }
    }

    /// The two-letter code sent on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Si => "si",
            Language::Ta => "ta",
        }
    }

    /// Fallback assistant message when a chat exchange fails. Carries the
    /// error detail for diagnosability.
    pub fn chat_fallback(&self, detail: &str) -> String {
        let lead = match self {
            Language::En => "Sorry, I couldn't process that. Please try again.",
            Language::Si => "සමාවන්න, එය සැකසීමට නොහැකි විය. කරුණාකර නැවත උත්සාහ කරන්න.",
            Language::Ta => "மன்னிக்கவும், அதைச் செயல்படுத்த முடியவில்லை. மீண்டும் முயற்சிக்கவும்.",
        };
        format!("{} ({})", lead, detail)
    }

    /// Shown when an export is requested on a near-empty transcript.
    pub fn export_too_short(&self) -> &'static str {
        match self {
            Language::En => "Let's chat a little more before exporting a summary.",
            Language::Si => "සාරාංශයක් ලබා ගැනීමට පෙර තව ටිකක් කතා කරමු.",
            Language::Ta => "சுருக்கத்தைப் பெறும் முன் இன்னும் கொஞ்சம் உரையாடுவோம்.",
        }
    }

    /// Shown once per session when the service reports export as disabled.
    pub fn export_disabled(&self) -> &'static str {
        match self {
            Language::En => "Transcript export isn't available right now.",
            Language::Si => "සංවාද සාරාංශය මේ මොහොතේ ලබා ගත නොහැක.",
            Language::Ta => "உரையாடல் சுருக்கம் தற்போது கிடைக்கவில்லை.",
        }
    }

    /// Shown on any other export failure, every time.
    pub fn export_failed(&self) -> &'static str {
        match self {
            Language::En => "PDF generation failed. Please try again.",
            Language::Si => "PDF සෑදීම අසාර්ථක විය. කරුණාකර නැවත උත්සාහ කරන්න.",
            Language::Ta => "PDF உருவாக்கம் தோல்வியடைந்தது. மீண்டும் முயற்சிக்கவும்.",
        }
    }

    /// Shown after a successful export.
    pub fn document_saved(&self, file_name: &str) -> String {
        let lead = match self {
            Language::En => "Saved your chat summary as",
            Language::Si => "ඔබගේ සංවාද සාරාංශය සුරැකුණා:",
            Language::Ta => "உங்கள் உரையாடல் சுருக்கம் சேமிக்கப்பட்டது:",
        };
        format!("{} {}", lead, file_name)
    }

    /// Validation error for a lead form without an email address.
    pub fn lead_email_required(&self) -> &'static str {
        match self {
            Language::En => "Please enter your email address.",
            Language::Si => "කරුණාකර ඔබගේ විද්‍යුත් තැපැල් ලිපිනය ඇතුළත් කරන්න.",
            Language::Ta => "உங்கள் மின்னஞ்சல் முகவரியை உள்ளிடவும்.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_prefix_match() {
        assert_eq!(Language::from_code("si"), Language::Si);
        assert_eq!(Language::from_code("si-LK"), Language::Si);
        assert_eq!(Language::from_code("ta"), Language::Ta);
        assert_eq!(Language::from_code("en-AU"), Language::En);
        assert_eq!(Language::from_code("fr"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn test_chat_fallback_carries_detail() {
        let message = Language::En.chat_fallback("Request timed out");
        assert!(message.contains("Request timed out"));
    }
}
