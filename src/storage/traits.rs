//! Remote storage trait definition

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::Collection;

/// Errors that can occur while talking to remote storage
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Remote storage is not configured")]
    NotConfigured,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),
}

/// Durable remote home of the collection.
///
/// `read` and `write` are total: they never fail, degrading to an empty
/// collection or `false` and logging the cause. Callers that need to tell a
/// missing file from a broken connection use `try_read`.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Short name used in logs and metrics
    fn name(&self) -> &'static str;

    /// True when every field needed to address the remote file is present
    fn is_configured(&self) -> bool;

    /// True when configured and a write credential is present
    fn can_write(&self) -> bool;

    /// Fetch the collection. A missing file is an empty collection.
    async fn try_read(&self) -> Result<Collection, StorageError>;

    /// Replace the remote collection, tagging the change with `message`
    async fn try_write(&self, categories: &Collection, message: &str) -> Result<(), StorageError>;

    /// Fetch the collection, degrading every failure to an empty collection
    async fn read(&self) -> Collection {
        match self.try_read().await {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!(store = self.name(), error = %e, "Failed to fetch remote data");
                Vec::new()
            }
        }
    }

    /// Replace the remote collection, reporting only whether it was accepted
    async fn write(&self, categories: &Collection, message: &str) -> bool {
        match self.try_write(categories, message).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(store = self.name(), error = %e, "Failed to save remote data");
                false
            }
        }
    }
}
