//! Token storage trait and error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while reading or writing the token store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("token store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token store is not a JSON object of strings: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value store holding credentials between sessions.
///
/// Mirrors the small surface of browser `localStorage` the dashboard relies
/// on: get, set and remove single keys.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::FileStorage`] - JSON file persisted on disk
/// - [`crate::infrastructure::storage::MemoryStorage`] - process-local map
#[async_trait]
pub trait TokenStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// Checks that the backing store is readable.
    async fn health_check(&self) -> bool;
}
