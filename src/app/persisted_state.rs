// SPDX-License-Identifier: MPL-2.0
//! Key-value storage for transient application state.
//!
//! This module handles state that should persist across sessions but is not
//! user-configurable (unlike preferences in `settings.toml`), such as the
//! calendar zoom level.
//!
//! The on-disk store keeps a flat string map in CBOR (Concise Binary Object
//! Representation) format for:
//! - Compact binary storage
//! - Clear separation from user-editable TOML preferences
//!
//! # Path Resolution
//!
//! The state file location can be customized for testing or portable deployments:
//! 1. Use [`FileStore::open`] with an explicit directory override
//! 2. Set `ICED_CALENDAR_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Asynchronous string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the value stored under `key`, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Store backed by a CBOR file.
///
/// Reads and writes go through the whole map; the mutex serializes
/// read-modify-write cycles issued from concurrent tasks.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    io: Mutex<()>,
}

impl FileStore {
    /// Store at `state.cbor` inside the data directory.
    ///
    /// Returns `None` when no data directory can be resolved.
    pub fn open(base_dir: Option<PathBuf>) -> Option<Self> {
        paths::get_app_data_dir_with_override(base_dir).map(|dir| Self::at(dir.join(STATE_FILE)))
    }

    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(ciborium::from_reader(bytes.as_slice())?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut bytes = Vec::new();
        ciborium::into_writer(map, &mut bytes)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.io.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let _guard = self.io.lock().await;
        // An unreadable file is replaced rather than blocking every later write.
        let mut map = self.read_map().await.unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), %err, "discarding unreadable state file");
            BTreeMap::new()
        });
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }
}

/// In-memory store, used when no data directory is available and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries: Mutex::new(entries),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful `set` calls so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        if key.is_empty() {
            return Err(Error::Storage("empty key".to_string()));
        }
        self.entries.lock().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let temp_dir = tempdir().expect("create temp dir");
        let store = FileStore::open(Some(temp_dir.path().to_path_buf())).expect("store");

        assert_eq!(store.get("calendar.unified_height").await.expect("get"), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn set_then_get_from_fresh_store() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let store = FileStore::open(Some(base_dir.clone())).expect("store");
        store.set("a", "1".to_string()).await.expect("set a");
        store.set("b", "2".to_string()).await.expect("set b");
        store.set("a", "3".to_string()).await.expect("overwrite a");

        let reopened = FileStore::open(Some(base_dir)).expect("store");
        assert_eq!(reopened.get("a").await.expect("get"), Some("3".to_string()));
        assert_eq!(reopened.get("b").await.expect("get"), Some("2".to_string()));
    }

    #[tokio::test]
    async fn set_creates_parent_directories() {
        let temp_dir = tempdir().expect("create temp dir");
        let nested = temp_dir.path().join("nested").join("deeply");
        let store = FileStore::open(Some(nested.clone())).expect("store");

        store.set("k", "v".to_string()).await.expect("set");
        assert!(nested.join(STATE_FILE).exists());
    }

    #[tokio::test]
    async fn corrupted_file_is_a_storage_error_on_read() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join(STATE_FILE);
        std::fs::write(&path, "not valid cbor data").expect("write file");

        let store = FileStore::at(&path);
        assert!(matches!(store.get("k").await, Err(Error::Storage(_))));
    }

    #[tokio::test]
    async fn corrupted_file_is_replaced_on_write() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join(STATE_FILE);
        std::fs::write(&path, "not valid cbor data").expect("write file");

        let store = FileStore::at(&path);
        store.set("k", "v".to_string()).await.expect("set");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
    }

    #[tokio::test]
    async fn memory_store_counts_writes() {
        let store = MemoryStore::with_entry("k", "v");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
        assert_eq!(store.writes(), 0);

        store.set("k", "w".to_string()).await.expect("set");
        assert_eq!(store.writes(), 1);
        assert!(store.set("", "x".to_string()).await.is_err());
        assert_eq!(store.writes(), 1);
    }
}
