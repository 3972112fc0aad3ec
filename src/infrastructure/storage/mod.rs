//! Persistent storage for dashboard credentials.
//!
//! Provides a [`TokenStorage`] trait with file-backed and in-memory
//! implementations. Selection happens at startup based on `TOKEN_STORE_PATH`.

mod file_storage;
mod memory_storage;
mod service;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use service::{StorageError, StorageResult, TokenStorage};
