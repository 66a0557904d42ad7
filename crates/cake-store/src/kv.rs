//! # Key-Value Stores
//!
//! The storage seam: string keys, string values, nothing else. The price
//! table and the selection echo are both opaque strings at this level.
//!
//! ## Implementations
//! ```text
//! ┌──────────────────┬────────────────────────────────────────────────────┐
//! │ MemoryStore      │ HashMap. Tests and throwaway sessions.            │
//! │ FileStore        │ One JSON document on disk, rewritten atomically   │
//! │                  │ (temp file + rename) on every write.              │
//! └──────────────────┴────────────────────────────────────────────────────┘
//! ```
//!
//! ## File Layout
//! ```json
//! {
//!   "cakePricing":   { "value": "{\"schemaVersion\":2,...}", "updatedAt": "2026-10-19T09:30:00Z" },
//!   "cakeSelection": { "value": "panSize=6+inch+round",       "updatedAt": "2026-10-19T09:31:12Z" }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Trait
// =============================================================================

/// A string-to-string store with single get/set/remove operations.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` when it was never set.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredValue {
    value: String,
    updated_at: DateTime<Utc>,
}

/// A store kept in one JSON file.
///
/// The whole document is read on `open` and held in memory; every write
/// rewrites the file. A file that is missing reads as an empty store. A file
/// that is not a valid store document also reads as empty (with a warning)
/// and is overwritten on the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredValue>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// ## Errors
    /// Only when the file exists but cannot be read (permissions, it is a
    /// directory, ...). Missing and corrupt files are not errors.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if path.file_name().is_none() {
            return Err(StoreError::StorageUnavailable(format!(
                "{} is not a file path",
                path.display()
            )));
        }

        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Store file is corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Store file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        Ok(FileStore { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When `key` was last written.
    pub fn updated_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|v| v.updated_at)
    }

    /// Writes `entries` to disk, then makes them the in-memory state.
    /// On error the in-memory state is unchanged.
    fn commit(&mut self, entries: BTreeMap<String, StoredValue>) -> StoreResult<()> {
        self.write(&entries)?;
        self.entries = entries;
        Ok(())
    }

    /// Writes the document to a sibling temp file, then renames it over the
    /// real one.
    fn write(&self, entries: &BTreeMap<String, StoredValue>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), keys = entries.len(), "Store file written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.clone();
        entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                updated_at: Utc::now(),
            },
        );
        self.commit(entries)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.commit(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
