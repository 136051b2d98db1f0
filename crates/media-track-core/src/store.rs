//! Raw string key-value storage underneath the typed [`Storage`](crate::Storage) layer.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::StoreError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Moves an unreadable value aside so the key reads as absent.
    fn quarantine(&mut self, key: &str) -> Result<(), StoreError> {
        self.remove(key)
    }
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn backup_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json.bak", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            debug!("Store miss: {} (file does not exist)", key);
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::io(path, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Atomic write: write to temp file, then rename
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value).map_err(|e| StoreError::io(&temp_path, e))?;
        std::fs::rename(&temp_path, &path).map_err(|e| StoreError::io(&path, e))?;
        debug!("Stored {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| StoreError::io(path, e))?;
        }
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let backup_path = self.backup_path_for(key);
        if let Err(e) = std::fs::rename(&path, &backup_path) {
            warn!("Failed to back up {:?}: {}. Removing it instead.", path, e);
            return self.remove(key);
        }
        warn!("Backed up unreadable {} to {:?}", key, backup_path);
        Ok(())
    }
}

/// In-memory store for tests and previews.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> Result<(), StoreError> {
        if let Some(value) = self.values.remove(key) {
            self.values.insert(format!("{}.bak", key), value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("store")).unwrap();

        assert_eq!(store.get("darkMode").unwrap(), None);
        store.set("darkMode", "true").unwrap();
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
        assert!(!store.path_for("darkMode").with_extension("json.tmp").exists());

        store.remove("darkMode").unwrap();
        assert_eq!(store.get("darkMode").unwrap(), None);
    }

    #[test]
    fn test_file_store_quarantine_keeps_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();
        store.set("watchedMedia", "{not json").unwrap();

        store.quarantine("watchedMedia").unwrap();
        assert_eq!(store.get("watchedMedia").unwrap(), None);
        let backup = std::fs::read_to_string(store.backup_path_for("watchedMedia")).unwrap();
        assert_eq!(backup, "{not json");
    }

    #[test]
    fn test_memory_store_quarantine() {
        let mut store = MemoryStore::new().with_value("playedGames", "oops");
        store.quarantine("playedGames").unwrap();
        assert_eq!(store.raw("playedGames"), None);
        assert_eq!(store.raw("playedGames.bak"), Some("oops"));
    }
}
