//! Application configuration loaded from `config.toml`.

use architect_core::error::{ArchitectError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
/// Environment variable consulted when no credential is stored.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Root configuration.
///
/// Every field has a default, so a partial or missing file is valid.
///
/// ```toml
/// model = "gemini-2.5-flash"
/// api_base_url = "https://generativelanguage.googleapis.com/v1beta/models"
/// request_timeout_secs = 120
/// storage_dir = "/home/me/.local/share/vertex-architect/store"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Overrides the key-value store directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Default log filter when `RUST_LOG` is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            storage_dir: None,
            log_level: None,
        }
    }
}

/// Loads [`AppConfig`] from a TOML file.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig::default())`: File doesn't exist or is empty
    /// - `Ok(config)`: Parsed configuration
    /// - `Err(ArchitectError::Config)`: File exists but is not valid TOML
    pub fn load(&self) -> Result<AppConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", self.path.display());
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            ArchitectError::config(format!("invalid {}: {}", self.path.display(), e))
        })
    }
}
