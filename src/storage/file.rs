//! JSON-file backed client storage.
//!
//! The whole store is one JSON object of string values. The file is the
//! only copy: reads go to disk, and every change re-reads the file, applies
//! the one key and replaces the file through a temporary sibling. Several
//! handles (or processes) on the same file therefore only ever overwrite
//! the keys they change.

use super::{ClientStorage, StorageError};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

type Entries = BTreeMap<String, String>;

/// Storage persisted to a JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens (or prepares to create) the store at `path`.
    ///
    /// A missing file starts an empty store. A file that cannot be parsed is
    /// treated as empty and overwritten on the next write; this is logged,
    /// not returned, so a damaged file never locks the user out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if an existing file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        debug!("Opened storage {} ({} keys)", path.display(), entries.len());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the file, applies `change` and writes the result back.
    ///
    /// Nothing is written when `change` reports no modification.
    fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut entries = load_entries(&self.path)?;
        if change(&mut entries) {
            write_entries(&self.path, &entries)?;
        }
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<Entries, StorageError> {
    if !path.exists() {
        return Ok(Entries::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }
    match serde_json::from_str::<Entries>(&content) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            warn!("Ignoring corrupted storage file {}: {}", path.display(), e);
            Ok(Entries::new())
        }
    }
}

fn write_entries(path: &Path, entries: &Entries) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(entries)?;

    let temp_path = path.with_extension("json.tmp");
    let mut temp_file = File::create(&temp_path)?;
    temp_file.write_all(json.as_bytes())?;
    temp_file.flush()?;
    drop(temp_file);

    fs::rename(&temp_path, path)?;
    Ok(())
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match load_entries(&self.path) {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!("Failed to read storage {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}
