//! HTTP transport backed by reqwest.

use super::Transport;
use crate::config::ClientConfig;
use crate::executor::error::RequestError;
use crate::models::request::{HttpMethod, MultipartForm, PreparedBody, PreparedRequest};
use crate::models::response::HttpResponse;
use log::debug;
use std::collections::HashMap;
use std::time::Instant;

/// Sends prepared requests with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport honoring the configured timeout, if any.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::BuildError` if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(config: &ClientConfig) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;
        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
    }
}

/// Converts a multipart payload into a reqwest form. reqwest picks the
/// boundary and sets the matching `Content-Type`.
fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, RequestError> {
    let mut out = reqwest::multipart::Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for file in form.files {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| RequestError::BuildError(format!("Invalid MIME type: {}", e)))?;
        out = out.part(file.field, part);
    }
    Ok(out)
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<HttpResponse, RequestError> {
        let start_time = Instant::now();
        let mut req_builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.clone());

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        req_builder = match request.body {
            PreparedBody::Empty => req_builder,
            PreparedBody::Json(text) => req_builder.body(text),
            PreparedBody::Multipart(form) => req_builder.multipart(to_reqwest_form(form)?),
        };

        let response = req_builder.send().await?;

        let status_code = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_string(), value_str.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::NetworkError(e.to_string()))?
            .to_vec();

        let duration = start_time.elapsed();
        debug!(
            "{} {} -> {} ({} bytes, {:?})",
            request.method,
            request.url,
            status_code,
            body.len(),
            duration
        );

        Ok(HttpResponse {
            status_code,
            status_text,
            headers,
            body,
            duration,
        })
    }
}
