//! Persistence layer for the Nerys widget: platform paths and the
//! TOML-backed profile repository.

pub mod paths;
pub mod storage;
mod toml_profile_repository;

pub use paths::NerysPaths;
pub use toml_profile_repository::TomlProfileRepository;
