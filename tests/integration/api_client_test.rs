//! API client behavior against a mock server.

use super::{client_for, shown};
use serde_json::{json, Value};
use std::time::Duration;
use veestributes_client::models::{FilePart, MultipartForm, ReleaseUpload};
use veestributes_client::{HttpMethod, NotificationLevel, RequestBody, RequestError, ResponseBody};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn header_value(request: &wiremock::Request, name: &str) -> Option<String> {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn test_bearer_token_sent_when_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/releases"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    client.context().set_auth_token("abc").unwrap();

    let body = client.call("/api/releases", HttpMethod::GET, None).await.unwrap();
    assert_eq!(body, ResponseBody::Json(json!([])));
}

#[tokio::test]
async fn test_no_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "ok");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(header_value(&requests[0], "authorization"), None);
    assert_eq!(
        header_value(&requests[0], "content-type").as_deref(),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_post_sends_serialized_json() {
    let server = MockServer::start().await;
    let payload = json!({"title": "Midnight Drive", "streams": 12});
    Mock::given(method("POST"))
        .and(path("/api/releases"))
        .and(header("content-type", "application/json"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let body = client
        .call("/api/releases", HttpMethod::POST, Some(RequestBody::Json(payload)))
        .await
        .unwrap();
    assert_eq!(body.as_json().and_then(|v| v.get("id")), Some(&json!(7)));
}

#[tokio::test]
async fn test_multipart_gets_transport_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let form = MultipartForm::new()
        .text("title", "Song")
        .file(FilePart::new("audio_file", "song.mp3", b"ID3".to_vec()));
    client
        .call("/api/upload", HttpMethod::POST, Some(RequestBody::Multipart(form)))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_type = header_value(&requests[0], "content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="title""#));
    assert!(body.contains(r#"name="audio_file"; filename="song.mp3""#));
}

#[tokio::test]
async fn test_not_found_error_is_notified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/releases/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let err = client.release(42).await.unwrap_err();

    match &err {
        RequestError::ApiError { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(message, "not found");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
    assert_eq!(
        shown(&client),
        vec![(NotificationLevel::Error, "not found".to_string())]
    );
}

#[tokio::test]
async fn test_unauthorized_prefers_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"message": "Authentication required", "error": "unauthorized"}),
        ))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let err = client.profile().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message(), "Authentication required");
}

#[tokio::test]
async fn test_plain_text_success_resolves_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let body = client.call("/api/ping", HttpMethod::GET, None).await.unwrap();
    assert_eq!(body.as_text(), Some("pong"));
    assert!(shown(&client).is_empty());
}

#[tokio::test]
async fn test_server_error_without_body_uses_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let err = client.analytics().await.unwrap_err();
    assert_eq!(err.message(), "Something went wrong");
    assert_eq!(shown(&client).len(), 1);
}

#[tokio::test]
async fn test_error_notification_expires() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/releases"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "maintenance"})))
        .mount(&server)
        .await;

    let (client, clock) = client_for(&server.uri());
    assert!(client.releases().await.is_err());
    assert_eq!(shown(&client).len(), 1);

    clock.advance(Duration::from_millis(3300));
    assert!(shown(&client).is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let (client, _) = client_for("http://127.0.0.1:9");
    let err = client.releases().await.unwrap_err();
    assert!(matches!(err, RequestError::NetworkError(_)));
    let notes = shown(&client);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NotificationLevel::Error);
}

#[tokio::test]
async fn test_upload_sends_release_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "release_id": 12,
            "message": "Release uploaded successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    client.context().set_auth_token("tok").unwrap();

    let upload = ReleaseUpload {
        title: "Midnight Drive".into(),
        artist: "Vee".into(),
        album: None,
        genre: "Electronic".into(),
        release_date: "2024-06-01".into(),
        description: Some("Night mix".into()),
        tags: None,
        platforms: vec!["spotify".into(), "apple".into()],
        audio: FilePart::new("audio", "drive.wav", b"RIFF".to_vec()),
        artwork: Some(FilePart::new("cover", "cover.png", vec![0x89, 0x50])),
    };
    let response = client.upload_release(&upload).await.unwrap();
    assert_eq!(response.release_id, 12);

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains(r#"name="audio_file"; filename="drive.wav""#));
    assert!(body.contains(r#"name="artwork"; filename="cover.png""#));
    assert!(body.contains("Midnight Drive"));
    assert_eq!(
        shown(&client),
        vec![(
            NotificationLevel::Success,
            "Release uploaded successfully".to_string()
        )]
    );
}

#[tokio::test]
async fn test_invalid_upload_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    let upload = ReleaseUpload {
        title: "Song".into(),
        artist: "Vee".into(),
        album: None,
        genre: "Pop".into(),
        release_date: "06/01/2024".into(),
        description: None,
        tags: None,
        platforms: vec![],
        audio: FilePart::new("audio", "song.txt", b"nope".to_vec()),
        artwork: None,
    };

    match client.upload_release(&upload).await {
        Err(RequestError::ValidationError(errors)) => {
            assert!(errors.get("release_date").is_some());
            assert!(errors.get(ReleaseUpload::AUDIO_FIELD).is_some());
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert!(shown(&client).is_empty());
}

#[tokio::test]
async fn test_admin_listings_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .and(header("authorization", "Bearer admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "email": "admin@veestributes.com", "name": "Admin", "is_admin": true,
             "created_at": "2024-01-01T00:00:00"},
            {"id": 2, "email": "vee@example.com", "name": "Vee", "is_admin": false,
             "created_at": "2024-03-15T12:30:00.250000"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 9, "title": "Midnight Drive", "artist": "Vee",
             "user_email": "vee@example.com", "status": "live", "streams": 1200,
             "created_at": "2024-06-01T08:00:00"}
        ])))
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    client.context().set_auth_token("admin-token").unwrap();

    let users = client.admin_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert!(users[0].is_admin);
    assert!(!users[1].is_admin);

    let releases = client.admin_releases().await.unwrap();
    assert_eq!(releases[0].user_email, "vee@example.com");
    assert_eq!(releases[0].streams, 1200);
}

#[tokio::test]
async fn test_admin_listing_forbidden_for_artists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/releases"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"error": "Admin access required"})),
        )
        .mount(&server)
        .await;

    let (client, _) = client_for(&server.uri());
    client.context().set_auth_token("artist-token").unwrap();

    let err = client.admin_releases().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.message(), "Admin access required");
    assert_eq!(
        shown(&client),
        vec![(NotificationLevel::Error, "Admin access required".to_string())]
    );
}
