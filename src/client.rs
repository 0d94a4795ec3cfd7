//! The Veestributes API client.
//!
//! Every call goes through one path: prepare (resolve the URL, apply
//! default headers, content type and bearer token, serialize the body),
//! dispatch through the transport, then interpret the response by status
//! and declared content type. Any failure on that path is shown as an
//! `error` notification and returned to the caller; there is no silent
//! failure.

use crate::auth::apply_authentication;
use crate::executor::{RequestError, ReqwestTransport, Transport, GENERIC_ERROR_MESSAGE};
use crate::models::{
    AdminRelease, Analytics, ApiRequest, AuthResponse, HealthStatus, HttpMethod, HttpResponse, LoginRequest,
    PreparedBody, PreparedRequest, Release, ReleaseDetail, ReleaseUpload, RequestBody,
    ResponseBody, SignupRequest, UploadResponse, User,
};
use crate::session::ClientContext;
use crate::validation::{login_request, signup_request, validate_upload, Form};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

/// Content type sent with every non-multipart request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Interprets a raw response.
///
/// The body is parsed first, by declared content type. A status outside
/// 200-299 then becomes `RequestError::ApiError`, with the body's `message`
/// or `error` text, or [`GENERIC_ERROR_MESSAGE`].
///
/// # Errors
///
/// `ParseError` for a declared-JSON body that does not parse (whatever the
/// status), `ApiError` for a failure status.
pub fn interpret_response(response: &HttpResponse) -> Result<ResponseBody, RequestError> {
    let body = response.parse_body()?;
    if response.is_success() {
        return Ok(body);
    }
    let message = body
        .error_message()
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
    Err(RequestError::ApiError {
        status: response.status_code,
        message,
    })
}

/// Authenticated client for the platform's `/api` endpoints.
#[derive(Debug)]
pub struct ApiClient<T = ReqwestTransport> {
    context: ClientContext,
    transport: T,
    base_url: Url,
}

impl ApiClient<ReqwestTransport> {
    /// Creates a client using the reqwest transport.
    ///
    /// # Errors
    ///
    /// `InvalidUrl` if the configured base URL does not parse, `BuildError`
    /// if the HTTP client cannot be initialized.
    pub fn new(context: ClientContext) -> Result<Self, RequestError> {
        let transport = ReqwestTransport::new(context.config())?;
        Self::with_transport(context, transport)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client dispatching through `transport`.
    pub fn with_transport(context: ClientContext, transport: T) -> Result<Self, RequestError> {
        let base_url = Url::parse(&context.config().base_url)?;
        Ok(Self {
            context,
            transport,
            base_url,
        })
    }

    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn resolve(&self, endpoint: &str) -> Result<Url, RequestError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = if endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        };
        Url::parse(&joined).map_err(|e| RequestError::InvalidUrl(format!("{}: {}", joined, e)))
    }

    /// Builds the request that will go on the wire.
    ///
    /// `Content-Type: application/json` is set unless the body is
    /// multipart. The stored token, when present, is attached as a bearer
    /// `Authorization` header. GET requests never carry a body.
    pub fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest, RequestError> {
        let url = self.resolve(&request.endpoint)?;

        let mut headers: HashMap<String, String> = self.context.config().default_headers.clone();
        headers.retain(|k, _| !k.eq_ignore_ascii_case("content-type"));

        let is_multipart = request.body.as_ref().map_or(false, RequestBody::is_multipart);
        if !is_multipart {
            headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        }

        let token = self.context.auth_token();
        apply_authentication(&mut headers, token.as_deref());

        let body = match (&request.body, request.method) {
            (None, _) | (Some(_), HttpMethod::GET) => PreparedBody::Empty,
            (Some(RequestBody::Json(value)), _) => PreparedBody::Json(serde_json::to_string(value)?),
            (Some(RequestBody::Multipart(form)), _) => PreparedBody::Multipart(form.clone()),
        };

        Ok(PreparedRequest {
            method: request.method,
            url,
            headers,
            body,
        })
    }

    fn report(&self, error: &RequestError) {
        warn!("API call failed: {}", error);
        self.context.notifications().error(error.message());
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ResponseBody, RequestError> {
        let prepared = self.prepare(request)?;
        debug!("{} {}", prepared.method, prepared.url);
        let response = self.transport.send(prepared).await?;
        interpret_response(&response)
    }

    /// Performs one API call.
    ///
    /// Resolves with the parsed body; on failure shows the error message as
    /// a notification and returns the error.
    pub async fn execute(&self, request: ApiRequest) -> Result<ResponseBody, RequestError> {
        match self.dispatch(&request).await {
            Ok(body) => Ok(body),
            Err(error) => {
                self.report(&error);
                Err(error)
            }
        }
    }

    /// Performs one API call from its parts.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path under the base URL, e.g. `/api/releases`
    /// * `method` - HTTP method
    /// * `data` - Optional JSON or multipart body
    pub async fn call(
        &self,
        endpoint: &str,
        method: HttpMethod,
        data: Option<RequestBody>,
    ) -> Result<ResponseBody, RequestError> {
        let mut request = ApiRequest::new(method, endpoint);
        request.body = data;
        self.execute(request).await
    }

    /// Performs a call and decodes the JSON body into `R`.
    ///
    /// Decoding failures are reported like any other failure.
    pub async fn execute_json<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<R, RequestError> {
        let body = self.execute(request).await?;
        body.into_json().map_err(|error| {
            self.report(&error);
            error
        })
    }

    fn remember_token(&self, auth: &AuthResponse) {
        let Some(token) = auth.token.as_deref() else {
            return;
        };
        if let Err(e) = self.context.set_auth_token(token) {
            warn!("Failed to store auth token: {}", e);
            self.context
                .notifications()
                .warning("Signed in, but the session could not be saved");
        }
    }

    /// Signs in. A token in the response is stored for later calls.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, RequestError> {
        let request =
            ApiRequest::post("/api/auth/login").with_body(RequestBody::json(credentials)?);
        let auth: AuthResponse = self.execute_json(request).await?;
        self.remember_token(&auth);
        self.context.notifications().success("Login successful!");
        Ok(auth)
    }

    /// Creates an account. A token in the response is stored for later calls.
    pub async fn signup(&self, account: &SignupRequest) -> Result<AuthResponse, RequestError> {
        let request =
            ApiRequest::post("/api/auth/signup").with_body(RequestBody::json(account)?);
        let auth: AuthResponse = self.execute_json(request).await?;
        self.remember_token(&auth);
        self.context
            .notifications()
            .success("Account created successfully!");
        Ok(auth)
    }

    /// Submits a login form and signs in with its values.
    ///
    /// A form that fails validation is returned as `ValidationError` without
    /// contacting the server; its fields keep their inline errors.
    pub async fn login_with(&self, form: &mut Form) -> Result<AuthResponse, RequestError> {
        let credentials = login_request(form)?;
        self.login(&credentials).await
    }

    /// Submits a signup form and creates the account from its values.
    ///
    /// A form that fails validation is returned as `ValidationError` without
    /// contacting the server.
    pub async fn signup_with(&self, form: &mut Form) -> Result<AuthResponse, RequestError> {
        let account = signup_request(form)?;
        self.signup(&account).await
    }

    /// Signs out. The stored token is cleared even if the server call fails.
    pub async fn logout(&self) -> Result<(), RequestError> {
        let result = self.execute(ApiRequest::post("/api/auth/logout")).await;
        if let Err(e) = self.context.clear_auth_token() {
            warn!("Failed to clear auth token: {}", e);
        }
        result.map(|_| ())
    }

    /// Current account.
    pub async fn profile(&self) -> Result<User, RequestError> {
        self.execute_json(ApiRequest::get("/api/user/profile")).await
    }

    /// Releases of the signed-in user, newest first.
    pub async fn releases(&self) -> Result<Vec<Release>, RequestError> {
        self.execute_json(ApiRequest::get("/api/releases")).await
    }

    /// One release with its files.
    pub async fn release(&self, id: u64) -> Result<ReleaseDetail, RequestError> {
        self.execute_json(ApiRequest::get(format!("/api/releases/{}", id)))
            .await
    }

    /// Dashboard figures.
    pub async fn analytics(&self) -> Result<Analytics, RequestError> {
        self.execute_json(ApiRequest::get("/api/analytics")).await
    }

    /// Every account on the platform. Requires an admin session; other
    /// accounts get a 403.
    pub async fn admin_users(&self) -> Result<Vec<User>, RequestError> {
        self.execute_json(ApiRequest::get("/api/admin/users")).await
    }

    /// The latest releases across all accounts, newest first. Requires an
    /// admin session.
    pub async fn admin_releases(&self) -> Result<Vec<AdminRelease>, RequestError> {
        self.execute_json(ApiRequest::get("/api/admin/releases")).await
    }

    /// Server liveness.
    pub async fn health(&self) -> Result<HealthStatus, RequestError> {
        self.execute_json(ApiRequest::get("/api/health")).await
    }

    /// Uploads a release as multipart form data.
    ///
    /// The upload is validated first; a validation failure is returned
    /// without contacting the server or raising a notification.
    pub async fn upload_release(
        &self,
        upload: &ReleaseUpload,
    ) -> Result<UploadResponse, RequestError> {
        validate_upload(upload)?;

        let request = ApiRequest::post("/api/upload")
            .with_body(RequestBody::Multipart(upload.to_multipart()));
        let response: UploadResponse = self.execute_json(request).await?;
        let message = response
            .message
            .clone()
            .unwrap_or_else(|| "Release uploaded successfully".to_string());
        self.context.notifications().success(message);
        Ok(response)
    }
}
