//! Local key/value store
//!
//! Durable named slots on disk, one file per key under a single directory.
//! Writes go to a temporary file first and are renamed into place, so a
//! crash never leaves a half-written slot behind.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the local store and the bindings built on it
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Local storage I/O failed: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to encode or decode slot: {0}")]
    CodecError(#[from] serde_json::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Directory-backed key/value store
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    /// Raw slot content, `None` when the slot is empty
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store raw content in a slot
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.root)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        tracing::trace!(key, bytes = value.len(), "Wrote local slot");
        Ok(())
    }

    /// Empty a slot. Removing an empty slot is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a slot holds a value
    pub fn contains(&self, key: &str) -> bool {
        self.slot_path(key).map(|p| p.is_file()).unwrap_or(false)
    }
}
