//! Platform path resolution for persisted widget state.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/nerys/             # Config directory
//! └── profile.toml             # The current user's contact-info record
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for nerys.
pub struct NerysPaths;

impl NerysPaths {
    /// Returns the nerys configuration directory (e.g. `~/.config/nerys/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("nerys"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the persisted profile record.
    pub fn profile_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("profile.toml"))
    }

    /// Returns the directory exported documents are saved into: the user's
    /// download directory when one exists, the current directory otherwise.
    pub fn download_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}
