//! Configuration schema for the Veestributes client.
//!
//! This module defines the configuration structure and validation logic for
//! all user-configurable settings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the client.
///
/// Settings are read from the `"veestributes"` key of a settings document.
/// Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Origin every endpoint path is resolved against.
    ///
    /// Defaults to `http://localhost:5000`. Must be an http or https URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    ///
    /// `None` (the default) leaves the transport's own behavior in place.
    /// When set, must be greater than 0.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Headers added to every request.
    ///
    /// The client's own `Content-Type` and `Authorization` handling is
    /// applied after these and wins on conflict.
    #[serde(default = "default_headers")]
    pub default_headers: HashMap<String, String>,

    /// Location of the persistent client storage file.
    ///
    /// Defaults to `~/.config/veestributes/storage.json` when unset.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Timing of transient notifications.
    #[serde(default)]
    pub notification: NotificationTimings,
}

/// Phase durations of a transient notification, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTimings {
    /// Delay between insertion and the visible state.
    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u64,

    /// Time from insertion until the fade-out starts.
    ///
    /// Runs alongside the show delay, and must be longer than it.
    #[serde(default = "default_visible_ms")]
    pub visible_ms: u64,

    /// Fade-out time before the element is removed.
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
}

impl NotificationTimings {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn visible(&self) -> Duration {
        Duration::from_millis(self.visible_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    /// Time from insertion until removal.
    pub fn total(&self) -> Duration {
        self.visible() + self.fade_out()
    }
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            show_delay_ms: default_show_delay_ms(),
            visible_ms: default_visible_ms(),
            fade_out_ms: default_fade_out_ms(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            default_headers: default_headers(),
            storage_path: None,
            notification: NotificationTimings::default(),
        }
    }
}

impl ClientConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("baseUrl is not a valid URL: {}", e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!(
                "baseUrl must use http or https, got: {}",
                parsed.scheme()
            ));
        }

        if self.timeout_ms == Some(0) {
            return Err("timeoutMs must be greater than 0".to_string());
        }

        if self.notification.visible_ms == 0 {
            return Err("notification.visibleMs must be greater than 0".to_string());
        }
        if self.notification.visible_ms <= self.notification.show_delay_ms {
            return Err(
                "notification.visibleMs must be longer than notification.showDelayMs".to_string(),
            );
        }

        Ok(())
    }

    /// Returns the timeout as a `Duration`, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

// Default value functions for serde

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "User-Agent".to_string(),
        concat!("Veestributes-Client/", env!("CARGO_PKG_VERSION")).to_string(),
    );
    headers
}

fn default_show_delay_ms() -> u64 {
    100
}

fn default_visible_ms() -> u64 {
    3000
}

fn default_fade_out_ms() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.timeout(), None);
        assert!(config.default_headers.contains_key("User-Agent"));
        assert_eq!(config.notification.show_delay_ms, 100);
        assert_eq!(config.notification.visible_ms, 3000);
        assert_eq!(config.notification.fade_out_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_notification_total() {
        let timings = NotificationTimings::default();
        assert_eq!(timings.total(), Duration::from_millis(3300));
    }

    #[test]
    fn test_validation_rejects_visible_within_show_delay() {
        let config = ClientConfig {
            notification: NotificationTimings {
                show_delay_ms: 500,
                visible_ms: 500,
                fade_out_ms: 300,
            },
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("showDelayMs"));
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let config = ClientConfig {
            base_url: "ftp://files.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("http or https"));

        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = ClientConfig {
            timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "timeoutMs must be greater than 0"
        );
    }

    #[test]
    fn test_validation_zero_visible() {
        let mut config = ClientConfig::default();
        config.notification.visible_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let json = r#"{
            "baseUrl": "https://veestributes.example.com",
            "timeoutMs": 15000,
            "notification": { "visibleMs": 5000 }
        }"#;

        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "https://veestributes.example.com");
        assert_eq!(config.timeout(), Some(Duration::from_millis(15000)));
        assert_eq!(config.notification.visible_ms, 5000);
        assert_eq!(config.notification.show_delay_ms, 100);
        assert!(config.default_headers.contains_key("User-Agent"));
    }
}
