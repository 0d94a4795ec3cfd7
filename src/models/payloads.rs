//! Typed payloads exchanged with the Veestributes API.
//!
//! Field names follow the server's JSON: auth and release endpoints use
//! snake_case, the analytics endpoint uses camelCase.

use super::request::{FilePart, MultipartForm};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Account as reported by the auth and profile endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Response of login and signup.
///
/// The server may authenticate by session cookie alone, in which case no
/// `token` is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Release summary from `GET /api/releases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub id: u64,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    pub status: String,
    #[serde(default)]
    pub streams: u64,
    #[serde(default)]
    pub earnings: f64,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// File attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFile {
    pub id: u64,
    pub filename: String,
    pub file_type: String,
    pub file_size: u64,
    pub uploaded_at: NaiveDateTime,
}

/// Full release record from `GET /api/releases/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDetail {
    #[serde(flatten)]
    pub release: Release,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    /// Comma-separated platform identifiers.
    #[serde(default)]
    pub platforms: Option<String>,
    #[serde(default)]
    pub files: Vec<ReleaseFile>,
}

impl ReleaseDetail {
    /// Platform identifiers, split and trimmed.
    pub fn platform_list(&self) -> Vec<&str> {
        self.platforms
            .as_deref()
            .map(|p| {
                p.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Entry of the dashboard activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub icon: String,
    pub description: String,
    pub time: String,
}

/// Dashboard figures from `GET /api/analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_releases: u64,
    pub total_streams: u64,
    pub total_earnings: f64,
    #[serde(default)]
    pub monthly_growth: f64,
    #[serde(default)]
    pub chart_labels: Vec<String>,
    #[serde(default)]
    pub chart_data: Vec<u64>,
    #[serde(default)]
    pub recent_activity: Vec<ActivityItem>,
}

impl Analytics {
    /// Pairs chart labels with their data points; extra entries on either
    /// side are dropped.
    pub fn chart_points(&self) -> Vec<(&str, u64)> {
        self.chart_labels
            .iter()
            .map(String::as_str)
            .zip(self.chart_data.iter().copied())
            .collect()
    }
}

/// Response of `POST /api/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    pub release_id: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Row of the admin release listing, `GET /api/admin/releases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRelease {
    pub id: u64,
    pub title: String,
    pub artist: String,
    /// Email of the owning account.
    pub user_email: String,
    pub status: String,
    #[serde(default)]
    pub streams: u64,
    pub created_at: NaiveDateTime,
}

/// A track release to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseUpload {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub genre: String,
    /// ISO date, `YYYY-MM-DD`.
    pub release_date: String,
    pub description: Option<String>,
    pub tags: Option<String>,
    pub platforms: Vec<String>,
    pub audio: FilePart,
    pub artwork: Option<FilePart>,
}

impl ReleaseUpload {
    /// Field name the server reads the audio file from.
    pub const AUDIO_FIELD: &'static str = "audio_file";
    /// Field name the server reads the artwork file from.
    pub const ARTWORK_FIELD: &'static str = "artwork";

    /// Converts the upload into the multipart payload the server expects.
    ///
    /// File parts are renamed to the server's field names; optional text
    /// fields are sent only when present.
    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", &self.title)
            .text("artist", &self.artist)
            .text("genre", &self.genre)
            .text("release_date", &self.release_date);

        let optional = [
            ("album", &self.album),
            ("description", &self.description),
            ("tags", &self.tags),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                form = form.text(name, value);
            }
        }
        for platform in &self.platforms {
            form = form.text("platforms", platform);
        }

        let mut audio = self.audio.clone();
        audio.field = Self::AUDIO_FIELD.to_string();
        form = form.file(audio);

        if let Some(artwork) = &self.artwork {
            let mut artwork = artwork.clone();
            artwork.field = Self::ARTWORK_FIELD.to_string();
            form = form.file(artwork);
        }
        form
    }
}
