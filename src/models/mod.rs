//! Data models for API requests, responses and payloads.
//!
//! This module contains the request descriptor handed to the client, the
//! raw and parsed response types, and the typed payloads of the Veestributes
//! endpoints.

pub mod payloads;
pub mod request;
pub mod response;

pub use payloads::{
    ActivityItem, AdminRelease, Analytics, AuthResponse, HealthStatus, LoginRequest, Release,
    ReleaseDetail, ReleaseFile, ReleaseUpload, SignupRequest, UploadResponse, User,
};
pub use request::{
    ApiRequest, FilePart, HttpMethod, MultipartForm, PreparedBody, PreparedRequest, RequestBody,
};
pub use response::{HttpResponse, ResponseBody};
