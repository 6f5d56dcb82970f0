//! Persistent key-value store backends
//!
//! The store is the durable, possibly synchronized copy of the preference
//! snapshot. `set_many` merges the given keys over whatever the store
//! already holds, so keys written by other (newer or older) versions of the
//! app survive a save from this one.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

use crate::constants::store as keys;
use crate::state::Snapshot;

pub trait SyncStore: Send + Sync {
    /// Read every key the store holds. An absent backing file is first-run,
    /// not an error: it reads as an empty snapshot.
    fn get_all(&self) -> Result<Snapshot>;

    /// Write the given keys, merging over existing ones.
    fn set_many(&self, snapshot: Snapshot) -> Result<()>;

    /// Human-readable location, for log messages
    fn describe(&self) -> String;
}

/// JSON-file backend under the platform config directory
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `<config_dir>/vista/state.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(keys::APP_DIR);
        path.push(keys::FILENAME);
        path
    }

    fn read_snapshot(&self) -> Result<Snapshot> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Snapshot::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to read state from {:?}", self.path));
            }
        };

        serde_json::from_str::<Snapshot>(&contents)
            .with_context(|| format!("Failed to parse state file {:?}", self.path))
    }
}

impl SyncStore for FileStore {
    fn get_all(&self) -> Result<Snapshot> {
        let snapshot = self.read_snapshot()?;
        info!(path = ?self.path, keys = snapshot.len(), "Loaded persisted state");
        Ok(snapshot)
    }

    fn set_many(&self, snapshot: Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory {parent:?}"))?;
        }

        // Merge over existing keys; a corrupt existing file is replaced
        // rather than blocking the save.
        let mut merged = self.read_snapshot().unwrap_or_default();
        merged.extend(snapshot);

        let contents = serde_json::to_string_pretty(&merged)
            .context("Failed to serialize state to JSON")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write state file {:?}", self.path))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory backend for `--ephemeral` runs and tests.
/// Counts completed writes so tests can assert save behavior.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Snapshot>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: Snapshot) -> Self {
        Self {
            data: Mutex::new(data),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed `set_many` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.lock().unwrap().get(key).cloned()
    }
}

impl SyncStore for MemoryStore {
    fn get_all(&self) -> Result<Snapshot> {
        Ok(self.data.lock().unwrap().clone())
    }

    fn set_many(&self, snapshot: Snapshot) -> Result<()> {
        self.data.lock().unwrap().extend(snapshot);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state.json"));
        (dir, store)
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_round_trip() {
        let (_dir, store) = temp_store();

        let mut snapshot = Snapshot::new();
        snapshot.insert("theme".into(), json!("dark"));
        snapshot.insert("stars".into(), json!(false));
        store.set_many(snapshot).unwrap();

        let loaded = store.get_all().unwrap();
        assert_eq!(loaded.get("theme"), Some(&json!("dark")));
        assert_eq!(loaded.get("stars"), Some(&json!(false)));
    }

    #[test]
    fn test_file_store_merges_over_existing_keys() {
        let (_dir, store) = temp_store();

        let mut first = Snapshot::new();
        first.insert("theme".into(), json!("dark"));
        first.insert("from_future_version".into(), json!({ "nested": true }));
        store.set_many(first).unwrap();

        let mut second = Snapshot::new();
        second.insert("theme".into(), json!("light"));
        store.set_many(second).unwrap();

        let loaded = store.get_all().unwrap();
        assert_eq!(loaded.get("theme"), Some(&json!("light")));
        // Keys this version does not recognize survive the save
        assert_eq!(
            loaded.get("from_future_version"),
            Some(&json!({ "nested": true }))
        );
    }

    #[test]
    fn test_file_store_rejects_corrupt_file_on_read() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        fs::write(&store.path, "{ not json").unwrap();

        assert!(store.get_all().is_err());
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let store = MemoryStore::new();
        assert_eq!(store.save_count(), 0);

        store.set_many(Snapshot::new()).unwrap();
        let mut snapshot = Snapshot::new();
        snapshot.insert("focus".into(), json!("write tests"));
        store.set_many(snapshot).unwrap();

        assert_eq!(store.save_count(), 2);
        assert_eq!(store.get("focus"), Some(json!("write tests")));
    }
}
