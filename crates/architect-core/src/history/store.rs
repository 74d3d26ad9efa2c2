//! In-process owner of the history collection.

use super::model::HistoryEntry;
use super::repository::HistoryRepository;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Newest-first log of sessions with delete and in-place result updates.
///
/// `HistoryStore` is the only writer of the persisted collection. Every
/// mutation runs under one lock together with its write-back, so a lookup by
/// id followed by an update cannot interleave with a deletion of that id.
/// Persistence is best-effort: write failures are logged and the in-memory
/// collection stays authoritative.
pub struct HistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
    repository: Arc<dyn HistoryRepository>,
}

impl HistoryStore {
    /// Loads the stored collection. Load failures start an empty history.
    pub async fn open(repository: Arc<dyn HistoryRepository>) -> Self {
        let entries = match repository.load_all().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to load history, starting empty: {}", e);
                Vec::new()
            }
        };
        tracing::debug!("History opened with {} entries", entries.len());

        Self {
            entries: Mutex::new(entries),
            repository,
        }
    }

    /// Snapshot of all entries, newest first.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<HistoryEntry> {
        self.entries
            .lock()
            .await
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Inserts `entry` at the front.
    pub async fn prepend(&self, entry: HistoryEntry) {
        let mut entries = self.entries.lock().await;
        entries.insert(0, entry);
        self.persist(&entries).await;
    }

    /// Sets `final_result` on the entry with `id`.
    ///
    /// Returns `false` and changes nothing when the entry no longer exists.
    pub async fn update_final_result(&self, id: &str, result: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
            return false;
        };
        entry.final_result = result.to_string();
        self.persist(&entries).await;
        true
    }

    /// Permanently removes the entry with `id`. Returns whether it existed.
    pub async fn delete(&self, id: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return false;
        }
        self.persist(&entries).await;
        true
    }

    async fn persist(&self, entries: &[HistoryEntry]) {
        if let Err(e) = self.repository.save_all(entries).await {
            tracing::warn!("Failed to persist history ({} entries): {}", entries.len(), e);
        }
    }
}
