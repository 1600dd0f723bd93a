//! Error types for the Nerys widget core.

use thiserror::Error;

/// A shared error type for the entire Nerys widget core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Transport failures carry
/// enough detail for the fallback messages shown to the user.
#[derive(Error, Debug, Clone)]
pub enum NerysError {
    /// The outbound call exceeded its configured timeout bound.
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-success status code.
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Profile persistence failed (never fatal to the user flow).
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NerysError {
    /// Creates an Http error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Creates a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Check if this is an Http error
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Check if this is a Parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this is a Storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns the HTTP status code if this is an Http error.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NerysError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NerysError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NerysError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for NerysError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, NerysError>`.
pub type Result<T> = std::result::Result<T, NerysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_accessor() {
        let err = NerysError::http(404, "not found");
        assert!(err.is_http());
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(NerysError::Timeout.http_status(), None);
    }

    #[test]
    fn test_timeout_predicate() {
        assert!(NerysError::Timeout.is_timeout());
        assert!(!NerysError::parse("bad body").is_timeout());
    }
}
