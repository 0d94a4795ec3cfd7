//! Client context shared by the API client and the UI layer.
//!
//! One context lives for one application session. It owns the
//! configuration, the persistent client storage (bearer token and theme
//! preference) and the notification center.

use crate::config::{self, ClientConfig};
use crate::notify::NotificationCenter;
use crate::storage::{
    ClientStorage, FileStorage, MemoryStorage, StorageError, AUTH_TOKEN_KEY, THEME_KEY,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored value. Anything but `"dark"` or `"light"` is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Session-scoped state handed to the API client and UI code.
#[derive(Clone)]
pub struct ClientContext {
    config: ClientConfig,
    storage: Arc<dyn ClientStorage>,
    notifications: Arc<NotificationCenter>,
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("config", &self.config)
            .field("authenticated", &self.is_authenticated())
            .field("notifications", &self.notifications)
            .finish()
    }
}

impl ClientContext {
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn ClientStorage>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        Self {
            config,
            storage,
            notifications,
        }
    }

    /// Context with volatile storage and wall-clock notifications.
    pub fn in_memory(config: ClientConfig) -> Self {
        let notifications = Arc::new(NotificationCenter::with_system_clock(config.notification));
        Self::new(config, Arc::new(MemoryStorage::new()), notifications)
    }

    /// Context backed by the storage file named in the configuration.
    ///
    /// Falls back to volatile storage when no storage location can be
    /// determined.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the storage file exists but cannot be read.
    pub fn open(config: ClientConfig) -> Result<Self, StorageError> {
        let storage: Arc<dyn ClientStorage> = match config::storage_path(&config) {
            Some(path) => Arc::new(FileStorage::open(path)?),
            None => {
                warn!("No storage location available; session will not be persisted");
                Arc::new(MemoryStorage::new())
            }
        };
        let notifications = Arc::new(NotificationCenter::with_system_clock(config.notification));
        Ok(Self::new(config, storage, notifications))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn ClientStorage> {
        &self.storage
    }

    pub fn notifications(&self) -> &Arc<NotificationCenter> {
        &self.notifications
    }

    /// Bearer token currently stored, if any.
    pub fn auth_token(&self) -> Option<String> {
        self.storage.get(AUTH_TOKEN_KEY)
    }

    /// True when a non-empty token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.auth_token().map_or(false, |t| !t.is_empty())
    }

    pub fn set_auth_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(AUTH_TOKEN_KEY, token)?;
        info!("Stored auth token");
        Ok(())
    }

    pub fn clear_auth_token(&self) -> Result<(), StorageError> {
        self.storage.remove(AUTH_TOKEN_KEY)?;
        info!("Cleared auth token");
        Ok(())
    }

    /// Stored theme preference; light when unset or unrecognized.
    pub fn theme(&self) -> Theme {
        self.storage
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    /// Switches between dark and light and persists the choice.
    ///
    /// # Returns
    ///
    /// The theme now in effect.
    pub fn toggle_theme(&self) -> Result<Theme, StorageError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
