//! API call error types.
//!
//! This module defines the errors an API call can end in: client-side
//! validation failures, transport failures, failure statuses reported by the
//! server, and undecodable response bodies.

use crate::validation::ValidationErrors;
use std::fmt;

/// Message used when a failed response carries neither `message` nor `error`.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Errors that can occur while performing an API call.
#[derive(Debug)]
pub enum RequestError {
    /// Client-side field checks failed.
    ///
    /// Raised before any network activity; the request was never sent.
    ValidationError(ValidationErrors),

    /// Transport failure before a response was obtained.
    ///
    /// This includes connection failures, DNS resolution errors, timeouts
    /// and failures while reading the response body.
    NetworkError(String),

    /// The server responded with a status outside 200-299.
    ///
    /// `message` is taken from the response body's `message` or `error`
    /// field, falling back to [`GENERIC_ERROR_MESSAGE`].
    ApiError { status: u16, message: String },

    /// A body declared as JSON could not be parsed, or a payload did not
    /// have the expected shape.
    ParseError(String),

    /// The endpoint could not be resolved against the base URL.
    InvalidUrl(String),

    /// The request could not be constructed.
    BuildError(String),
}

impl RequestError {
    /// Returns the human-readable message shown to the user.
    ///
    /// For [`RequestError::ApiError`] this is exactly the server-provided
    /// text, without status decoration.
    pub fn message(&self) -> String {
        match self {
            RequestError::ApiError { message, .. } => message.clone(),
            RequestError::ValidationError(errors) => errors.summary(),
            other => other.to_string(),
        }
    }

    /// Returns the HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the stored credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::ValidationError(errors) => {
                write!(f, "Validation failed: {}", errors.summary())
            }
            RequestError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            RequestError::ApiError { status, message } => {
                write!(f, "API error ({}): {}", status, message)
            }
            RequestError::ParseError(msg) => write!(f, "Response parse error: {}", msg),
            RequestError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            RequestError::BuildError(msg) => write!(f, "Request build error: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}

/// Maps reqwest failures onto the transport/build variants.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if err.is_timeout() {
            RequestError::NetworkError(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            RequestError::NetworkError(format!("Connection failed: {}", err))
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::ParseError(err.to_string())
    }
}

impl From<ValidationErrors> for RequestError {
    fn from(errors: ValidationErrors) -> Self {
        RequestError::ValidationError(errors)
    }
}
