//! File-backed key-value store.
//!
//! Each key maps to one file `<dir>/<key>.value`, written atomically.

use super::atomic_file::AtomicFile;
use architect_core::error::{ArchitectError, Result};
use architect_core::storage::KeyValueStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Directory of small text files, one per key.
///
/// Responsibilities:
/// - Map keys to file paths (keys are restricted to `[A-Za-z0-9_.-]`)
/// - Atomic replace on write, idempotent remove
///
/// Does NOT:
/// - Interpret values (history JSON, credentials)
/// - Encrypt anything; the credential file is plaintext, created with mode 600 on Unix
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(ArchitectError::storage(format!("invalid storage key '{key}'")));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{key}.value"))))
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ArchitectError::internal(format!("storage task failed: {e}")))?
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key)?;
        blocking(move || {
            file.read()
                .map_err(|e| ArchitectError::storage(format!("read {}: {e}", file.path().display())))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file = self.file_for(key)?;
        let value = value.to_string();
        blocking(move || {
            file.write(&value).map_err(|e| {
                ArchitectError::storage(format!("write {}: {e}", file.path().display()))
            })?;
            restrict_permissions(file.path());
            Ok(())
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let file = self.file_for(key)?;
        blocking(move || {
            file.remove().map_err(|e| {
                ArchitectError::storage(format!("remove {}: {e}", file.path().display()))
            })
        })
        .await
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        tracing::debug!("Could not restrict permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
