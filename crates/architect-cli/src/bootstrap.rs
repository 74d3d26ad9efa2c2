//! Wires configuration, storage, the Gemini client and the studio together.

use anyhow::{Context, Result};
use architect_application::Studio;
use architect_core::history::HistoryStore;
use architect_core::storage::KeyValueStore;
use architect_infrastructure::{
    AppConfig, ArchitectPaths, ConfigService, FileKeyValueStore, FsAttachmentLoader,
    KvCredentialService, KvHistoryRepository,
};
use architect_interaction::GeminiClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Resolved locations and configuration, available before logging starts.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub store_dir: PathBuf,
    pub exports_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl Settings {
    /// `config_path` overrides the config file location. `data_dir` roots
    /// every directory. A `storage_dir` in the config file wins over both
    /// for the key-value store.
    pub fn resolve(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let paths = ArchitectPaths::new(data_dir);
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => paths.config_file()?,
        };
        let config = ConfigService::new(&config_path).load()?;

        let store_dir = match &config.storage_dir {
            Some(dir) => dir.clone(),
            None => paths.store_dir()?,
        };

        Ok(Self {
            store_dir,
            exports_dir: paths.exports_dir()?,
            logs_dir: paths.logs_dir()?,
            config_path,
            config,
        })
    }
}

pub struct AppContext {
    pub studio: Arc<Studio>,
    pub settings: Settings,
}

impl AppContext {
    pub async fn build(settings: Settings, fallback_api_key: Option<String>) -> Result<Self> {
        tracing::info!(
            "[Bootstrap] config={}, store={}",
            settings.config_path.display(),
            settings.store_dir.display()
        );

        let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(&settings.store_dir));
        let history =
            Arc::new(HistoryStore::open(Arc::new(KvHistoryRepository::new(store.clone()))).await);
        let credentials =
            Arc::new(KvCredentialService::new(store).with_fallback(fallback_api_key));

        let config = &settings.config;
        let generator = GeminiClient::with_timeout(
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .context("Failed to create Gemini client")?
        .with_base_url(config.api_base_url.clone());
        tracing::info!("[Bootstrap] Using model {}", generator.model());

        let studio = Arc::new(Studio::new(
            history,
            Arc::new(generator),
            credentials,
            Arc::new(FsAttachmentLoader::new()),
        ));

        Ok(Self { studio, settings })
    }
}
