//! Error types for Vertex Architect.

use thiserror::Error;

/// Input problems detected before any request is issued.
///
/// The `Display` text is the message shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please configure your API key to continue.")]
    MissingCredential,

    #[error("Please type an idea or attach a file to get started.")]
    EmptyInput,

    #[error("Generate a super prompt before running it.")]
    MissingSuperPrompt,
}

/// A shared error type for the whole workspace.
///
/// Provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum ArchitectError {
    /// Precondition failure; no request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A file whose content type is not on the allow-list.
    #[error("Unsupported attachment type '{mime_type}' for {name}. Only PNG, JPEG, WEBP, HEIC images and PDFs are supported.")]
    UnsupportedAttachment { name: String, mime_type: String },

    /// Any failure talking to the generative-AI service
    #[error("Generation service error: {0}")]
    Service(String),

    /// Key-value storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ArchitectError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the validation kind, if this is a validation error.
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(kind) => Some(*kind),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ArchitectError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ArchitectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ArchitectError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ArchitectError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error, used at the application boundary.
impl From<anyhow::Error> for ArchitectError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ArchitectError>`.
pub type Result<T> = std::result::Result<T, ArchitectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_user_facing() {
        let err: ArchitectError = ValidationError::EmptyInput.into();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Please type an idea or attach a file to get started."
        );
        assert_eq!(err.as_validation(), Some(ValidationError::EmptyInput));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ArchitectError = io.into();
        assert!(matches!(err, ArchitectError::Io { .. }));
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn json_error_converts_to_serialization() {
        let err: ArchitectError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        match err {
            ArchitectError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
