//! JSON-file-backed token storage.

use super::service::{StorageResult, TokenStorage};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Token storage persisted as a flat JSON object.
///
/// The whole file is loaded on [`FileStorage::open`] and rewritten on every
/// mutation. Writes go to a sibling `.tmp` file first and are then renamed
/// over the original, so a crash never leaves a half-written store. The
/// in-memory map only changes once the write has succeeded.
///
/// # File Format
///
/// ```json
/// { "adminAuthToken": "eyJhbGciOi...", "adminTokenRefresh": "..." }
/// ```
pub struct FileStorage {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the store at `path`. A missing file opens as an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`super::StorageError::Io`] if the file exists but cannot be read,
    /// or [`super::StorageError::Malformed`] if it is not a JSON object of strings.
    pub async fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        let items = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Token store not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    async fn persist(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        let body = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStorage for FileStorage {
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = self.items.lock().await;
        let mut updated = items.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated).await?;
        *items = updated;
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = self.items.lock().await;
        if !items.contains_key(key) {
            return Ok(());
        }
        let mut updated = items.clone();
        updated.remove(key);
        self.persist(&updated).await?;
        *items = updated;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => !meta.permissions().readonly(),
            // Not written yet; the directory decides whether we can create it.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => {
                warn!(path = %self.path.display(), "Token store unavailable: {}", e);
                false
            }
        }
    }
}
