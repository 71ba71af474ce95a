//! [`Persistence`] implementations.
//!
//! - [`FileStorage`]: a JSON object on disk, `{ "key": "value", ... }`, the
//!   desktop counterpart of browser local storage
//! - [`MemoryStorage`]: in-process map for tests and throwaway sessions

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::ports::Persistence;

// =============================================================================
// File Storage
// =============================================================================

/// Key-value strings persisted as a single JSON object file.
///
/// Every `get` re-reads the file and every `set` rewrites it, so several
/// processes pointed at the same file see each other's last write. Writes go
/// to `<file>.tmp` first and are renamed into place, so an interrupted write
/// never leaves a half-written storage file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("storage"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_all(&self) -> StoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StoreError::Storage(format!("{} is not a storage file: {}", self.path.display(), e))
        })
    }
}

impl Persistence for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::StatePoisoned)?;

        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, serde_json::to_string_pretty(&entries)?)?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StoreError::Storage(format!("rename {}: {}", temp_path.display(), e))
        })?;

        debug!(path = %self.path.display(), key, bytes = value.len(), "Storage written");
        Ok(())
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory key-value storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, e.g. with a snapshot from a previous session.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.into(), value.into());
        }
        storage
    }
}

impl Persistence for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StoreError::StatePoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::StatePoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
