//! Credential service trait.
//!
//! Defines the interface for loading and storing the generative-AI API key.

use crate::error::Result;
use async_trait::async_trait;

/// Service for managing the API credential.
///
/// # Security Note
///
/// Implementations must never log the key or include it in error messages.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Loads the configured API key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(key))`: A non-empty key is configured
    /// - `Ok(None)`: No key is configured
    /// - `Err(_)`: The backing storage could not be read
    async fn load_api_key(&self) -> Result<Option<String>>;

    /// Persists `key`. An empty key removes the stored credential.
    async fn save_api_key(&self, key: &str) -> Result<()>;
}
