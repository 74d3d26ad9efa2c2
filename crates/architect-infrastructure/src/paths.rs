//! Unified path management for Vertex Architect files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vertex-architect/        # Config directory
//! └── config.toml                    # Application configuration
//!
//! ~/.local/share/vertex-architect/   # Data directory
//! ├── store/                         # Key-value storage (history, API key)
//! ├── exports/                       # Default target of markdown exports
//! └── logs/                          # Application logs
//!     └── vertex-architect.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "vertex-architect";

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

/// Resolves every on-disk location.
///
/// With a base path (tests, `--data-dir`) all directories live under it;
/// otherwise the platform config/data directories from `dirs` are used.
#[derive(Debug, Clone, Default)]
pub struct ArchitectPaths {
    base_path: Option<PathBuf>,
}

impl ArchitectPaths {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base_path: base_path.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_path {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_path {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn store_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("store"))
    }

    pub fn exports_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("exports"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
