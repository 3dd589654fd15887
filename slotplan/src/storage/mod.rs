//! Durable key-value storage for the task collection.
//!
//! Defines the [`KvStorage`] capability the store receives by injection,
//! plus two backends: [`MemoryStorage`] for tests and ephemeral runs, and
//! [`FileStorage`] which maps each key to a JSON file on disk. All
//! operations are synchronous; the store treats writes as best-effort and
//! never blocks on durability.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A read operation failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// A write operation failed.
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// A string-keyed blob store.
///
/// The store persists the whole task collection under a single key, so
/// implementations only need get/set of one value at a time. Absent keys
/// read as `Ok(None)`, never as an error.
pub trait KvStorage {
    /// Reads the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadFailed`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::WriteFailed`] if the backend cannot be
    /// written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory [`KvStorage`] backend.
///
/// Not persistent; all data is lost when the value is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates a new, empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed [`KvStorage`] that keeps one JSON file per key.
///
/// A key `k` lives at `<dir>/k.json`. The directory is created on first
/// write; a missing file reads as `None`.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage backend rooted at `dir`.
    ///
    /// The directory does not need to exist yet.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        std::fs::write(self.path_for(key), value)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}
