//! Persistent client-side storage.
//!
//! A small string key/value store standing in for the browser's local
//! storage. The client keeps two keys in it: the bearer token
//! ([`AUTH_TOKEN_KEY`]) and the theme preference ([`THEME_KEY`]).
//!
//! Writes are not coordinated beyond the store's own lock: when two writers
//! race on a key, the last write wins.

pub mod file;

pub use file::FileStorage;

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// Key holding the bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Key holding the theme preference (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";

/// Errors raised by storage backends.
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    Io(std::io::Error),

    /// The stored document could not be encoded or decoded.
    Serialization(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::Serialization(err) => write!(f, "Storage serialization error: {}", err),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err)
    }
}

/// String key/value store shared by the API client and the UI layer.
pub trait ClientStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Volatile storage, used for tests and for sessions that should not
/// outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .remove(key);
        Ok(())
    }
}
