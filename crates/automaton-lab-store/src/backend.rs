//! Key-value backends the store persists into.
//!
//! The surrounding application treats persistence as an abstract string
//! key-value store (originally browser local storage). [`JsonFileStore`]
//! keeps one file per key under a root directory; [`MemoryStore`] backs
//! tests and demos.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

/// Abstract string key-value storage.
///
/// Implementations are expected to be cheap to call synchronously from the
/// mutation path; the store writes after every change.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> io::Result<()>;
}

/// File-backed key-value store: each key maps to `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given directory. The directory is created
    /// lazily on first write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let value = std::fs::read_to_string(&path)?;
        debug!(path = %path.display(), "Read key-value entry");
        Ok(Some(value))
    }

    fn put(&self, key: &str, value: &str) -> io::Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
        }
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote key-value entry");
        Ok(())
    }
}

/// In-memory key-value store for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned())
    }

    fn put(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
