//! History domain module.
//!
//! - `model`: the persisted `HistoryEntry`
//! - `repository`: persistence interface (`HistoryRepository`)
//! - `store`: the in-process owner of the ordered collection (`HistoryStore`)

mod model;
mod repository;
mod store;

pub use model::{HistoryEntry, strip_attachment_suffix, summarize_idea};
pub use repository::HistoryRepository;
pub use store::HistoryStore;
