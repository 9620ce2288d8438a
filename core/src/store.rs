//! Key/value storage capability injected into the controllers.
//!
//! # Design
//! The views share two stores with different lifetimes: a transient one that
//! carries the selected character from the list to the detail view and dies
//! with the session, and a durable one that keeps the theme preference across
//! sessions. Both sit behind the same narrow `KeyValueStore` trait and are
//! passed into controller calls rather than owned by the controllers.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Key under which the list view stores the selected character.
pub const SELECTED_CHARACTER_KEY: &str = "selectedCharacter";

/// Key under which the theme preference is persisted.
pub const THEME_KEY: &str = "theme";

/// String key/value storage. Writes replace the previous value wholesale.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store. Used as the session-scoped store and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Durable store persisted as a flat JSON object.
///
/// The file is read once on open; a missing file is an empty store. Every
/// write goes through to disk via a sibling temp file and a rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk. The in-memory map is left to the caller so a
    /// failed write never shows up in later reads.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn memory_store_overwrites_wholesale() {
        let mut store = MemoryStore::new();
        assert!(store.get("k").is_none());
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("prefs.json")).unwrap();
        assert!(store.get(THEME_KEY).is_none());
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(THEME_KEY, "light").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert!(reopened.get("a").is_none());
        assert_eq!(reopened.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn file_store_failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("prefs");
        fs::create_dir(&sub).unwrap();

        let mut store = FileStore::open(sub.join("prefs.json")).unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        store.set("other", "1").unwrap();
        fs::remove_dir_all(&sub).unwrap();

        assert_matches!(store.set(THEME_KEY, "light"), Err(StoreError::Io(_)));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        assert_matches!(store.remove("other"), Err(StoreError::Io(_)));
        assert_eq!(store.get("other").as_deref(), Some("1"));
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert_matches!(FileStore::open(&path), Err(StoreError::Corrupt(_)));
    }
}
