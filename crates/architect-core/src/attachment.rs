//! Attachment encoding.
//!
//! Converts raw file bytes into the transport form sent to the model:
//! MIME type, base64 payload and a display preview.

use crate::error::{ArchitectError, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Content types accepted as attachments.
pub const SUPPORTED_MIME_TYPES: [&str; 5] = [
    "image/png",
    "image/jpeg",
    "image/webp",
    "image/heic",
    "application/pdf",
];

/// A user-supplied image or PDF, encoded for a multimodal request.
///
/// Immutable once created. Attachments live only in the active draft and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name as selected by the user
    pub name: String,
    /// `data:` URI for images, empty for other types
    pub preview: String,
    /// MIME type of the file
    pub mime_type: String,
    /// Standard base64 of the file contents
    pub payload: String,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Decoded size in bytes.
    pub fn size(&self) -> usize {
        let padding = self.payload.bytes().rev().take_while(|b| *b == b'=').count();
        (self.payload.len() / 4) * 3 - padding
    }
}

/// Reads a file and produces an [`Attachment`].
///
/// Implementations validate the content type before reading any bytes.
#[async_trait]
pub trait AttachmentLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<Attachment>;
}

pub fn is_supported_mime_type(mime_type: &str) -> bool {
    SUPPORTED_MIME_TYPES.contains(&mime_type)
}

/// Validates the declared content type without touching any bytes.
pub fn ensure_supported(name: &str, mime_type: &str) -> Result<()> {
    if is_supported_mime_type(mime_type) {
        Ok(())
    } else {
        Err(ArchitectError::UnsupportedAttachment {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        })
    }
}

/// Encodes file contents into an [`Attachment`].
///
/// Rejects content types outside [`SUPPORTED_MIME_TYPES`].
pub fn encode(name: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Result<Attachment> {
    let name = name.into();
    ensure_supported(&name, mime_type)?;

    let payload = BASE64_STANDARD.encode(bytes);
    let preview = if mime_type.starts_with("image/") {
        format!("data:{mime_type};base64,{payload}")
    } else {
        String::new()
    };

    Ok(Attachment {
        name,
        preview,
        mime_type: mime_type.to_string(),
        payload,
    })
}
