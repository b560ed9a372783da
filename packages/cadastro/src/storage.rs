//! Durable key/value storage for saved-address markers.
//!
//! The form only ever needs `get` and `set`, so any medium that can hold a
//! string per key works: an in-process map, a JSON file, a server session.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::{CadastroError, Result};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| CadastroError::Storage("store lock poisoned".into()))
}

// =============================================================================
// In-memory store
// =============================================================================

/// Process-local store. Survives across forms that share it, not across runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// Flat JSON object on disk, rewritten on every `set`.
///
/// A missing file reads as empty; parent directories are created on first write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: HashMap<String, String> = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened marker store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "true").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("true"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("markers.json");

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("endereco_salvo_12345").unwrap(), None);
        store.set("endereco_salvo_12345", "true").unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("endereco_salvo_12345").unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("markers.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path).unwrap_err();
        assert!(matches!(err, CadastroError::Storage(_)));
    }
}
