//! Durable key-value backends for the layout record.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;

use super::snapshot::ValidationError;

/// Failures of local persistence.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be read.
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend could not be written.
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The layout could not be serialized.
    #[error("failed to encode layout: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored record is not a valid layout.
    #[error("stored layout '{key}' is corrupt: {source}")]
    Decode {
        key: String,
        #[source]
        source: ValidationError,
    },
}

/// A string key-value store holding serialized layouts.
pub trait LayoutStorage: Send + Sync {
    /// Reads the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the backend fails.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the backend fails.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ============================================================================
// File Storage
// ============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous record intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    /// The directory records are stored in.
    #[must_use]
    pub fn dir(&self) -> &Path { &self.dir }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf { self.dir.join(format!("{key}.json")) }
}

impl LayoutStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { key: key.to_string(), source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write { key: key.to_string(), source };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        let mut file = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;
        file.persist(self.path_for(key)).map_err(|err| write_err(err.error))?;

        Ok(())
    }
}

// ============================================================================
// Memory Storage
// ============================================================================

/// In-memory storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty memory storage.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create a memory storage holding one entry.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.entries.lock().insert(key.into(), value.into());
        storage
    }

    /// Returns a copy of the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> { self.entries.lock().get(key).cloned() }
}

impl LayoutStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> { Ok(self.get(key)) }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
