//! File-backed key-value store persisting a single JSON object.
//!
//! The whole map is held in memory and rewritten to disk on every mutation
//! via write-to-temp-then-rename, so a crash mid-write leaves the previous
//! file intact. Suitable for the small per-device data sets this layer
//! manages, not for large stores.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::KeyValueStore;
use crate::error::{Result, StoreError};

/// File-backed key-value store.
///
/// The backing file is a JSON object mapping keys to string values. Opening
/// a path that does not exist yet starts from an empty map; the file is
/// created on first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open a store backed by the given path, loading any existing data.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read.
    /// Returns `StoreError::Serialize` if the file exists but is not a JSON
    /// object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw).map_err(|source| StoreError::Serialize { source })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries: RwLock::new(entries) })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the current map and atomically replace the backing file.
    ///
    /// Callers must hold the write lock across this call so concurrent
    /// mutations cannot interleave their rewrites.
    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|source| StoreError::Serialize { source })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    async fn multi_remove(&self, keys: &[String]) -> Result<()> {
        let mut entries = self.entries.write();
        let mut changed = false;
        for key in keys {
            changed |= entries.remove(key).is_some();
        }
        if changed {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use placeway_test_utils::TestDir;

    use super::*;

    #[tokio::test]
    async fn test_open_missing_file_starts_empty() {
        let dir = TestDir::new();
        let store = FileStore::open(dir.join("kv.json")).expect("open");
        assert!(store.get_all_keys().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = TestDir::new();
        let path = dir.join("kv.json");

        {
            let store = FileStore::open(&path).expect("open");
            store.set_item("k1", "v1").await.expect("set");
            store.set_item("k2", "v2").await.expect("set");
        }

        let store = FileStore::open(&path).expect("reopen");
        assert_eq!(store.get_item("k1").await.expect("get"), Some("v1".to_string()));
        assert_eq!(store.get_all_keys().await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let dir = TestDir::new();
        let path = dir.join("kv.json");

        {
            let store = FileStore::open(&path).expect("open");
            store.set_item("k1", "v1").await.expect("set");
            store.remove_item("k1").await.expect("remove");
        }

        let store = FileStore::open(&path).expect("reopen");
        assert_eq!(store.get_item("k1").await.expect("get"), None);
    }

    #[tokio::test]
    async fn test_multi_remove_persists() {
        let dir = TestDir::new();
        let path = dir.join("kv.json");

        {
            let store = FileStore::open(&path).expect("open");
            for i in 0..4 {
                store.set_item(&format!("k{i}"), "v").await.expect("set");
            }
            store
                .multi_remove(&["k0".to_string(), "k3".to_string()])
                .await
                .expect("multi remove");
        }

        let store = FileStore::open(&path).expect("reopen");
        assert_eq!(
            store.get_all_keys().await.expect("list"),
            vec!["k1".to_string(), "k2".to_string()]
        );
    }

    #[test]
    fn test_open_rejects_malformed_file() {
        let dir = TestDir::new();
        let path = dir.join("kv.json");
        std::fs::write(&path, "not json").expect("write garbage");

        let err = FileStore::open(&path).expect_err("open must fail");
        assert!(matches!(err, StoreError::Serialize { .. }));
    }
}
