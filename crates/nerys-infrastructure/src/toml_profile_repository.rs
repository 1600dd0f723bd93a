//! TOML-backed profile repository.
//!
//! Persists the single contact-info record at the platform config dir. Reads
//! and writes run on the blocking pool so async callers never stall on disk.

use crate::paths::NerysPaths;
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use async_trait::async_trait;
use nerys_core::error::{NerysError, Result};
use nerys_core::profile::{Profile, ProfileRepository};
use std::path::PathBuf;
use std::sync::Arc;

impl From<AtomicTomlError> for NerysError {
    fn from(err: AtomicTomlError) -> Self {
        NerysError::storage(err.to_string())
    }
}

/// `ProfileRepository` implementation over an atomic TOML file.
#[derive(Clone)]
pub struct TomlProfileRepository {
    file: Arc<AtomicTomlFile<Profile>>,
}

impl TomlProfileRepository {
    /// Creates a repository at the default location
    /// (`~/.config/nerys/profile.toml`).
    pub fn new() -> Result<Self> {
        let path = NerysPaths::profile_file()
            .map_err(|err| NerysError::config(err.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a repository at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        }
    }
}

#[async_trait]
impl ProfileRepository for TomlProfileRepository {
    async fn load(&self) -> Result<Option<Profile>> {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.load().map_err(NerysError::from))
            .await
            .map_err(|err| NerysError::internal(format!("Failed to join task: {}", err)))?
    }

    async fn save(&self, profile: &Profile) -> Result<()> {
        let file = self.file.clone();
        let profile = profile.clone();
        tokio::task::spawn_blocking(move || file.save(&profile).map_err(NerysError::from))
            .await
            .map_err(|err| NerysError::internal(format!("Failed to join task: {}", err)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_absent_profile() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlProfileRepository::with_path(temp_dir.path().join("profile.toml"));

        let loaded = repository.load().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlProfileRepository::with_path(temp_dir.path().join("profile.toml"));

        let profile = Profile {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("+61 400 000 000".to_string()),
        };
        repository.save(&profile).await.unwrap();

        let loaded = repository.load().await.unwrap().unwrap();
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_save_replaces_record_wholesale() {
        let temp_dir = TempDir::new().unwrap();
        let repository = TomlProfileRepository::with_path(temp_dir.path().join("profile.toml"));

        repository
            .save(&Profile {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
                phone: Some("+61 400 000 000".to_string()),
            })
            .await
            .unwrap();
        repository
            .save(&Profile {
                name: None,
                email: Some("grace@example.com".to_string()),
                phone: None,
            })
            .await
            .unwrap();

        let loaded = repository.load().await.unwrap().unwrap();
        assert_eq!(loaded.email.as_deref(), Some("grace@example.com"));
        assert!(loaded.name.is_none());
        assert!(loaded.phone.is_none());
    }
}
