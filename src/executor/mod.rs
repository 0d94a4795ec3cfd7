//! Request dispatch.
//!
//! A [`Transport`] takes a fully prepared request (URL resolved, headers
//! applied, body serialized) and returns the raw response. It knows nothing
//! about tokens, content-type policy or error bodies; that all happens in
//! the API client. [`ReqwestTransport`] is the production implementation.
//!
//! There is no retry and no cancellation: a request runs to completion or
//! fails once.

pub mod error;
pub mod native;

pub use error::{RequestError, GENERIC_ERROR_MESSAGE};
pub use native::ReqwestTransport;

use crate::models::request::PreparedRequest;
use crate::models::response::HttpResponse;
use std::future::Future;

/// Sends a prepared request and returns the raw response.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; only failures to obtain a response are errors.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: PreparedRequest,
    ) -> impl Future<Output = Result<HttpResponse, RequestError>> + Send;
}
