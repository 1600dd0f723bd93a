//! Contact-info profile domain model and repository contract.
//!
//! At most one profile exists per session: the current user's. It is loaded
//! once at controller construction and replaced wholesale when the lead form
//! is submitted.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The current user's contact-info record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Profile {
    /// A profile is complete iff it carries a non-empty email address.
    pub fn is_complete(&self) -> bool {
        self.email
            .as_deref()
            .is_some_and(|email| !email.trim().is_empty())
    }
}

/// The contact-info form as submitted from the modal prompt.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadForm {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl LeadForm {
    /// Splits the full-name field into first/last on the first whitespace
    /// run. A single-word name has no last name.
    pub fn split_name(&self) -> (Option<String>, Option<String>) {
        let trimmed = self.full_name.trim();
        if trimmed.is_empty() {
            return (None, None);
        }
        match trimmed.split_once(char::is_whitespace) {
            Some((first, rest)) => (
                Some(first.to_string()),
                Some(rest.trim_start().to_string()),
            ),
            None => (Some(trimmed.to_string()), None),
        }
    }

    /// Converts the form into the profile record it replaces.
    pub fn to_profile(&self) -> Profile {
        let name = self.full_name.trim();
        Profile {
            name: (!name.is_empty()).then(|| name.to_string()),
            email: Some(self.email.trim().to_string()),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }
}

/// Persistence contract for the single profile record.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Reads the persisted record, `None` if absent.
    async fn load(&self) -> Result<Option<Profile>>;

    /// Overwrites the persisted record.
    async fn save(&self, profile: &Profile) -> Result<()>;
}
