//! Client library for the Veestributes music distribution platform.
//!
//! Artists sign in, upload releases (audio plus artwork and metadata) and
//! follow streams and earnings. This crate is the client side of that:
//! every server call goes through one authenticated wrapper, failures
//! surface as on-screen notifications, and forms are checked before any
//! request is made.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **client**: `ApiClient`, the single path for API calls, plus typed helpers
//! - **executor**: The `Transport` seam and its reqwest implementation
//! - **models**: Request, response and payload types
//! - **auth**: Bearer token header handling
//! - **validation**: Field rules, form state and upload checks
//! - **notify**: Timed notification stack with a deterministic scheduler
//! - **session**: `ClientContext`, which ties configuration, storage and
//!   notifications together for one session
//! - **storage**: Persistent key/value storage for the token and theme
//! - **config**: Client configuration and its loading
//!
//! # Call flow
//!
//! 1. The endpoint is resolved against the configured base URL
//! 2. `Content-Type: application/json` is set unless the body is multipart
//! 3. The stored token, if any, is attached as `Authorization: Bearer <token>`
//! 4. The transport sends the request
//! 5. A JSON body is parsed when the response declares JSON, otherwise the
//!    text is returned as-is
//! 6. A status outside 200-299 fails with the body's `message` or `error`
//!    text; the failure is shown as an error notification and returned
//!
//! # Usage
//!
//! ```no_run
//! use veestributes_client::{ApiClient, ClientConfig, ClientContext};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let context = ClientContext::open(ClientConfig::default())?;
//! let client = ApiClient::new(context)?;
//! for release in client.releases().await? {
//!     println!("{} - {} ({} streams)", release.artist, release.title, release.streams);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod executor;
pub mod models;
pub mod notify;
pub mod session;
pub mod storage;
pub mod validation;

pub use client::{interpret_response, ApiClient};
pub use config::{ClientConfig, NotificationTimings};
pub use executor::{RequestError, ReqwestTransport, Transport};
pub use models::{ApiRequest, HttpMethod, RequestBody, ResponseBody};
pub use notify::{Notification, NotificationCenter, NotificationLevel};
pub use session::{ClientContext, Theme};
pub use validation::{Form, ValidationErrors};
