//! API response data models.
//!
//! `HttpResponse` is what a transport hands back: status, headers and raw
//! bytes. `ResponseBody` is what the client resolves a call with once the
//! declared content type has been inspected.

use crate::executor::error::RequestError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Raw HTTP response received from the server.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Time from dispatch until the body was fully read.
    pub duration: Duration,
}

impl HttpResponse {
    /// Creates a new HttpResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            headers: HashMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Gets the Content-Type header value if present.
    ///
    /// Header names are matched case-insensitively.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// True when the declared content type is `application/json`.
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }

    /// Adds a header to the response.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Sets the response body.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    /// Parses the body according to its declared content type.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::ParseError` when the response declares JSON but
    /// the body is not valid JSON.
    pub fn parse_body(&self) -> Result<ResponseBody, RequestError> {
        if self.is_json() {
            let value = serde_json::from_slice(&self.body)
                .map_err(|e| RequestError::ParseError(format!("Invalid JSON body: {}", e)))?;
            Ok(ResponseBody::Json(value))
        } else {
            Ok(ResponseBody::Text(
                String::from_utf8_lossy(&self.body).into_owned(),
            ))
        }
    }
}

/// Parsed result of a successful call, tagged by the declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body declared as `application/json`.
    Json(Value),
    /// Any other body, as text.
    Text(String),
}

impl ResponseBody {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    /// Decodes a JSON body into a typed payload.
    ///
    /// # Errors
    ///
    /// `RequestError::ParseError` if the body is text or the JSON does not
    /// match `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        match self {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Text(text) => Err(RequestError::ParseError(format!(
                "Expected a JSON response, got text: {}",
                truncate(&text, 80)
            ))),
        }
    }

    /// Extracts the failure text from a body: the `message` field, else the
    /// `error` field.
    ///
    /// A field counts when it is a non-empty string, a non-zero number or
    /// `true`; numbers and booleans are rendered as text. `null`, `false`,
    /// `0`, `""`, arrays and objects fall through to the next field.
    pub fn error_message(&self) -> Option<String> {
        let value = self.as_json()?;
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(scalar_text))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}
