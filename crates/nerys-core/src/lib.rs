pub mod config;
pub mod error;
pub mod i18n;
pub mod lead_gate;
pub mod markup;
pub mod profile;
pub mod property;
pub mod transcript;

// Re-export common error type
pub use error::NerysError;
