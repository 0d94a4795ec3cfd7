//! API request data models.
//!
//! This module defines the request descriptor handed to the API client
//! (endpoint, method, optional body) and the prepared request that the
//! client hands to a transport once headers and serialization are applied.

use crate::executor::error::RequestError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use url::Url;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// Retrieve a resource
    GET,
    /// Submit data to create a resource
    POST,
    /// Replace a resource
    PUT,
    /// Partially modify a resource
    PATCH,
    /// Remove a resource
    DELETE,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single file carried by a multipart payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name, e.g. `audio_file`.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a file part from in-memory content, guessing the MIME type
    /// from the file name's extension.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for_file_name(&file_name).to_string();
        Self {
            field: field.into(),
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Reads a file from disk into a file part.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::BuildError` if the file cannot be read.
    pub fn from_path(field: impl Into<String>, path: &Path) -> Result<Self, RequestError> {
        let bytes = std::fs::read(path).map_err(|e| {
            RequestError::BuildError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(field, file_name, bytes))
    }

    /// Lowercased extension of the file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the file has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn mime_for_file_name(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "ogg" => "audio/ogg",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// A file-plus-fields payload.
///
/// The boundary marker is chosen by the transport, so the client never sets
/// a `Content-Type` header for these bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    /// Text fields, in insertion order. Names may repeat.
    pub fields: Vec<(String, String)>,
    /// File parts, in insertion order.
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Adds a file part.
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Returns every value recorded for a text field.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// Body attached to an API request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// A plain data object, serialized to a JSON string on dispatch.
    Json(serde_json::Value),
    /// A file upload, passed through to the transport unmodified.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Builds a JSON body from any serializable payload.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, RequestError> {
        Ok(RequestBody::Json(serde_json::to_value(payload)?))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// Describes one API call: endpoint path, method and optional body.
///
/// The bearer token is deliberately absent; the client reads it from
/// storage when the request is prepared.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Endpoint path relative to the base URL, e.g. `/api/releases`.
    pub endpoint: String,
    pub method: HttpMethod,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::POST, endpoint)
    }

    /// Attaches a body to the request.
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Serialized body of a prepared request.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedBody {
    Empty,
    /// JSON text sent with `Content-Type: application/json`.
    Json(String),
    /// Multipart payload; the transport supplies the content type.
    Multipart(MultipartForm),
}

/// A request with its URL resolved, headers applied and body serialized.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: HashMap<String, String>,
    pub body: PreparedBody,
}

impl PreparedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}
