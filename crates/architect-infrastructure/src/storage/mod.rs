//! Storage layer: atomic files and the file-backed key-value store.

mod atomic_file;
mod file_store;

pub use atomic_file::{AtomicFile, AtomicFileError};
pub use file_store::FileKeyValueStore;
