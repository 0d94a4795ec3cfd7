//! Configuration loading for the Veestributes client.
//!
//! Settings live under the `"veestributes"` key of a JSON settings document.
//! User settings are applied over the defaults and validated; settings that
//! cannot be parsed are reported and the defaults are used instead. The
//! resulting `ClientConfig` is owned by the client context rather than held
//! in a global.

pub mod schema;

pub use schema::{ClientConfig, NotificationTimings};

use log::warn;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Key of the client's section in a settings document.
pub const SETTINGS_KEY: &str = "veestributes";

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "VEESTRIBUTES_BASE_URL";

/// Loads configuration from a settings JSON value.
///
/// # Arguments
///
/// * `settings_json` - Optional settings document with a `"veestributes"` section
///
/// # Returns
///
/// `Ok(ClientConfig)` with the loaded configuration, or `Err` if the
/// resulting configuration fails validation.
///
/// # Example
///
/// ```
/// use veestributes_client::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "veestributes": {
///         "baseUrl": "https://api.veestributes.example",
///         "timeoutMs": 10000
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout_ms, Some(10000));
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ClientConfig, String> {
    let mut config = ClientConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<ClientConfig>(section.clone()) {
            Ok(user_config) => config = user_config,
            Err(e) => {
                warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY, e
                );
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    Ok(config)
}

/// Loads configuration from a JSON settings file.
///
/// A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<ClientConfig, String> {
    if !path.exists() {
        return load_config(None);
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    load_config(Some(value))
}

/// Applies the `VEESTRIBUTES_BASE_URL` override, if set, and revalidates.
pub fn apply_env_overrides(mut config: ClientConfig) -> Result<ClientConfig, String> {
    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        if !base_url.trim().is_empty() {
            config.base_url = base_url.trim().to_string();
        }
    }
    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;
    Ok(config)
}

/// Directory holding the client's settings and storage files.
///
/// `~/.config/veestributes` on Unix-like systems, the roaming AppData
/// equivalent on Windows.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config").join("veestributes"))
    } else {
        std::env::var_os("USERPROFILE").map(|profile| {
            PathBuf::from(profile)
                .join("AppData")
                .join("Roaming")
                .join("veestributes")
        })
    }
}

/// Resolved storage file path for a configuration.
pub fn storage_path(config: &ClientConfig) -> Option<PathBuf> {
    config
        .storage_path
        .clone()
        .or_else(|| config_dir().map(|dir| dir.join("storage.json")))
}
