//! Widget configuration.
//!
//! The embedding page constructs a [`WidgetConfig`] once and hands it to the
//! session controller. There is no ambient global configuration.

use serde::{Deserialize, Serialize};

/// Configuration supplied by the embedder at construction time.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the assistant service API (e.g. `http://localhost:8000/api/v1`).
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Timeout bound for every outbound call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Language code forwarded to the service verbatim ("en", "si", "ta").
    #[serde(default = "default_language")]
    pub language: String,
    /// Maximum number of property results requested per exchange.
    #[serde(default = "default_result_limit")]
    pub result_limit: u32,
    /// Sliding window of prior messages sent with each chat request.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Sales inbox used by the contact-agent affordance.
    #[serde(default = "default_sales_email")]
    pub sales_email: String,
    /// Optional greeting seeded into the transcript as the first assistant
    /// message, mirroring a welcome bubble already present on the page.
    #[serde(default)]
    pub greeting: Option<String>,
    /// Which optional UI affordances this embedding exposes.
    #[serde(default)]
    pub features: WidgetFeatures,
}

/// Optional UI affordances. The five historical widget variants differed only
/// in which of these were present, so the controller is parameterized by them
/// instead of being forked.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WidgetFeatures {
    /// Whether the surface has a language selector.
    #[serde(default = "default_true")]
    pub language_selector: bool,
    /// Whether the surface renders the dynamic quick-reply row.
    #[serde(default = "default_true")]
    pub dynamic_quick_replies: bool,
    /// Whether the surface has the inline contact-info prompt. When absent,
    /// the lead gate never fires and export proceeds with whatever profile
    /// fields exist.
    #[serde(default = "default_true")]
    pub inline_lead_prompt: bool,
}

impl Default for WidgetFeatures {
    fn default() -> Self {
        Self {
            language_selector: true,
            dynamic_quick_replies: true,
            inline_lead_prompt: true,
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_ms: default_timeout_ms(),
            language: default_language(),
            result_limit: default_result_limit(),
            history_window: default_history_window(),
            sales_email: default_sales_email(),
            greeting: None,
            features: WidgetFeatures::default(),
        }
    }
}

impl WidgetConfig {
    /// Creates a config pointing at the given API base, defaults elsewhere.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }
}

fn default_api_base() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_language() -> String {
    "en".to_string()
}

fn default_result_limit() -> u32 {
    5
}

fn default_history_window() -> usize {
    8
}

fn default_sales_email() -> String {
    "sales@sathomson.com.au".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.history_window, 8);
        assert_eq!(config.result_limit, 5);
        assert!(config.features.dynamic_quick_replies);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: WidgetConfig =
            toml::from_str("api_base = \"https://example.com/api/v1\"").unwrap();
        assert_eq!(config.api_base, "https://example.com/api/v1");
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.language, "en");
        assert!(config.features.inline_lead_prompt);
    }
}
