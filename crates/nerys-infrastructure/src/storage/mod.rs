//! Storage primitives for persisted widget state.

pub mod atomic_toml;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
