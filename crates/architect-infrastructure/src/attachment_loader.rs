//! Filesystem attachment loader.

use architect_core::attachment::{self, Attachment, AttachmentLoader};
use architect_core::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Reads attachments from local files.
///
/// The MIME type is guessed from the file extension. Files outside the
/// allow-list are rejected before they are opened.
#[derive(Debug, Clone, Default)]
pub struct FsAttachmentLoader;

impl FsAttachmentLoader {
    pub fn new() -> Self {
        Self
    }
}

pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

#[async_trait]
impl AttachmentLoader for FsAttachmentLoader {
    async fn load(&self, path: &Path) -> Result<Attachment> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = guess_mime_type(path);

        attachment::ensure_supported(&name, &mime_type)?;

        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Read attachment {} ({}, {} bytes)", name, mime_type, bytes.len());

        attachment::encode(name, &mime_type, &bytes)
    }
}
