//! Durable key-value slots for the session record
//!
//! `SessionStore` only needs "read a string under a key" and "write a string
//! under a key". `FileStorage` keeps one JSON file per key in a directory;
//! `MemoryStorage` keeps slots in a map and can be switched to read-only to
//! simulate an unavailable backend.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Well-known key for the session record
pub const SESSION_STORAGE_KEY: &str = "emotion-session";

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to access session storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}

/// A local durable key-value slot
pub trait SessionStorage {
    /// Read the value under `key`; `None` when the slot is empty
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key`
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Set aside an unreadable value so it is not parsed again
    fn quarantine(&mut self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One `<key>.json` file per slot under a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(path)?))
    }

    /// Atomic write: temp file in the same directory, then persist over the target
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        let parent = path
            .parent()
            .ok_or_else(|| StorageError::InvalidPath(path.display().to_string()))?;
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(&path).map_err(|e| StorageError::Io(e.error))?;

        Ok(())
    }

    /// Rename the unreadable file to `<key>.json.bak`
    fn quarantine(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::rename(&path, path.with_extension("json.bak"))?;
        }
        Ok(())
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process slots, for tests and embedders without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a value already in a slot
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.slots.insert(key.into(), value.into());
        storage
    }

    /// Reject every write, as a full or disabled backend would
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.read_only {
            return Err(StorageError::Unavailable("storage is read-only".to_string()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> StorageResult<()> {
        if let Some(value) = self.slots.remove(key) {
            self.slots.insert(format!("{}.bak", key), value);
        }
        Ok(())
    }
}
