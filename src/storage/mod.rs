//! Persistent key-value storage for raw component data.
//!
//! Storage mirrors the browser-local-storage contract the cache was
//! designed around: string values under string keys, one key per
//! component plus one reserved key for the last-update timestamp.
//! Availability is a runtime capability - the cache holds an
//! `Option<impl KeyValueStore>` and treats `None` as "no storage",
//! never as an error.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// String key-value store, the persistence substrate for raw component
/// series and the last-update timestamp.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one file per key under a cache directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Store under the platform cache directory, or `None` when the
    /// platform reports no usable location.
    pub fn open_default() -> Option<Self> {
        let dir = dirs::cache_dir()?.join(crate::config::APP_NAME);
        Self::new(dir).ok()
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", key))?;
        Ok(Some(contents))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write cache file: {}", key))?;
        Ok(())
    }
}

/// In-memory store. Used in tests and wherever persistence across
/// sessions is not wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("polls").unwrap(), None);
        store.set("polls", "[{\"fcdate\":\"01.10.2020\"}]").unwrap();
        assert_eq!(
            store.get("polls").unwrap().as_deref(),
            Some("[{\"fcdate\":\"01.10.2020\"}]")
        );

        // Overwrite replaces wholesale.
        store.set("polls", "[]").unwrap();
        assert_eq!(store.get("polls").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("last_update").unwrap(), None);
        store.set("last_update", "2020-11-03T12:00:00Z").unwrap();
        assert_eq!(
            store.get("last_update").unwrap().as_deref(),
            Some("2020-11-03T12:00:00Z")
        );
    }
}
