//! Credential service implementation.

use architect_core::credential::CredentialService;
use architect_core::error::Result;
use architect_core::storage::{CREDENTIAL_KEY, KeyValueStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Keeps the raw API key under [`CREDENTIAL_KEY`].
///
/// When nothing is stored, an optional fallback (usually read from the
/// `GEMINI_API_KEY` environment variable at startup) is used instead.
pub struct KvCredentialService {
    store: Arc<dyn KeyValueStore>,
    fallback: Option<String>,
}

impl KvCredentialService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, key: Option<String>) -> Self {
        self.fallback = key.filter(|k| !k.trim().is_empty());
        self
    }
}

#[async_trait]
impl CredentialService for KvCredentialService {
    async fn load_api_key(&self) -> Result<Option<String>> {
        let stored = self
            .store
            .get(CREDENTIAL_KEY)
            .await?
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        Ok(stored.or_else(|| self.fallback.clone()))
    }

    async fn save_api_key(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            tracing::info!("Removing stored API key");
            self.store.remove(CREDENTIAL_KEY).await
        } else {
            tracing::info!("Storing API key");
            self.store.set(CREDENTIAL_KEY, key).await
        }
    }
}
