//! Infrastructure adapters: file-backed storage, configuration, paths,
//! attachment loading and export.

pub mod attachment_loader;
pub mod config;
pub mod credential_service;
pub mod export;
pub mod history_repository;
pub mod paths;
pub mod storage;

pub use crate::attachment_loader::FsAttachmentLoader;
pub use crate::config::{AppConfig, ConfigService};
pub use crate::credential_service::KvCredentialService;
pub use crate::history_repository::KvHistoryRepository;
pub use crate::paths::ArchitectPaths;
pub use crate::storage::FileKeyValueStore;
