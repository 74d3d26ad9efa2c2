//! History repository trait.

use super::model::HistoryEntry;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the ordered history collection.
///
/// The collection is read and written as a whole, newest entry first.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Loads every stored entry in stored order.
    ///
    /// Unreadable stored data yields an empty collection rather than an error.
    async fn load_all(&self) -> Result<Vec<HistoryEntry>>;

    /// Replaces the stored collection with `entries`.
    async fn save_all(&self, entries: &[HistoryEntry]) -> Result<()>;
}
