//! Domain core for Vertex Architect.
//!
//! Holds the data model, the workflow state machine, the estimators and the
//! ports (`KeyValueStore`, `HistoryRepository`, `CredentialService`,
//! `PromptGenerator`) that the outer crates implement.

pub mod attachment;
pub mod credential;
pub mod error;
pub mod estimate;
pub mod history;
pub mod prompt;
pub mod session;
pub mod storage;

pub use error::{ArchitectError, Result, ValidationError};
