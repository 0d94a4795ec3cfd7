//! Sign-in, sign-out and preference persistence across sessions.

use serde_json::json;
use tempfile::TempDir;
use veestributes_client::config::load_config;
use veestributes_client::validation::{login_form, signup_form, signup_request};
use veestributes_client::{ApiClient, ClientConfig, ClientContext, RequestError, Theme};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn file_backed_config(dir: &TempDir, base_url: &str) -> ClientConfig {
    load_config(Some(json!({
        "veestributes": {
            "baseUrl": base_url,
            "storagePath": dir.path().join("storage.json"),
        }
    })))
    .expect("config should load")
}

#[tokio::test]
async fn test_login_token_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "vee@example.com", "password": "hunter22!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "session-1",
            "user": {"id": 3, "email": "vee@example.com", "name": "Vee"}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = file_backed_config(&dir, &server.uri());

    {
        let client = ApiClient::new(ClientContext::open(config.clone()).unwrap()).unwrap();
        let mut form = login_form();
        form.input("email", "vee@example.com");
        form.input("password", "hunter22!");
        let auth = client.login_with(&mut form).await.unwrap();
        assert_eq!(auth.user.map(|u| u.id), Some(3));
    }

    let reopened = ClientContext::open(config).unwrap();
    assert_eq!(reopened.auth_token().as_deref(), Some("session-1"));
    assert!(reopened.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_persisted_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = file_backed_config(&dir, &server.uri());
    let context = ClientContext::open(config.clone()).unwrap();
    context.set_auth_token("session-2").unwrap();

    ApiClient::new(context).unwrap().logout().await.unwrap();

    let reopened = ClientContext::open(config).unwrap();
    assert_eq!(reopened.auth_token(), None);
}

#[tokio::test]
async fn test_signup_rejected_form_never_calls_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let context = ClientContext::open(file_backed_config(&dir, &server.uri())).unwrap();
    let client = ApiClient::new(context).unwrap();

    let mut form = signup_form();
    form.input("firstname", "Vee");
    form.input("lastname", "");
    form.input("email", "not-an-email");
    form.input("password", "short");

    let errors = match client.signup_with(&mut form).await {
        Err(RequestError::ValidationError(errors)) => errors,
        other => panic!("expected validation failure, got {:?}", other),
    };
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(client.context().notifications().active().is_empty());
    assert_eq!(errors.get("lastname"), Some("This field is required"));
    assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    assert_eq!(
        errors.get("password"),
        Some("Password must be at least 8 characters")
    );
    assert!(form.has_error("email"));
}

#[tokio::test]
async fn test_signup_conflict_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let context = ClientContext::open(file_backed_config(&dir, &server.uri())).unwrap();
    let client = ApiClient::new(context).unwrap();

    let mut form = signup_form();
    for (name, value) in [
        ("firstname", "Vee"),
        ("lastname", "Stone"),
        ("email", "vee@example.com"),
        ("password", "hunter22!"),
    ] {
        form.input(name, value);
    }
    let account = signup_request(&mut form).unwrap();

    let err = client.signup(&account).await.unwrap_err();
    assert_eq!(err.message(), "Email already registered");
    assert_eq!(client.context().auth_token(), None);

    let active = client.context().notifications().active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].message, "Email already registered");
}

#[test]
fn test_theme_preference_persists() {
    let dir = TempDir::new().unwrap();
    let config = file_backed_config(&dir, "http://localhost:5000");

    let context = ClientContext::open(config.clone()).unwrap();
    assert_eq!(context.theme(), Theme::Light);
    assert_eq!(context.toggle_theme().unwrap(), Theme::Dark);

    let reopened = ClientContext::open(config).unwrap();
    assert_eq!(reopened.theme(), Theme::Dark);
}
