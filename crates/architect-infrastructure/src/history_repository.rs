//! History persistence over the key-value store.

use architect_core::error::Result;
use architect_core::history::{HistoryEntry, HistoryRepository};
use architect_core::storage::{HISTORY_KEY, KeyValueStore};
use async_trait::async_trait;
use std::sync::Arc;

/// Stores the whole history as one JSON array under [`HISTORY_KEY`].
pub struct KvHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl HistoryRepository for KvHistoryRepository {
    async fn load_all(&self) -> Result<Vec<HistoryEntry>> {
        let Some(raw) = self.store.get(HISTORY_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!("Discarding unreadable stored history: {}", e);
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.set(HISTORY_KEY, &json).await
    }
}
