mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use common::test_config;
use reqwest::Client;
use serde_json::json;
use tokio::sync::Mutex;
use tower::ServiceExt;
use vibelist::{server, spotify::AuthClient, types::PendingLogin};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

const ISSUED_STATE: &str = "Ab3dEf6hIj9kLm2n";

fn listener(server: &MockServer) -> (Router, Arc<Mutex<Option<PendingLogin>>>) {
    let auth = AuthClient::new(Client::new(), &test_config(&server.uri()));
    let pending = Arc::new(Mutex::new(Some(PendingLogin::new(ISSUED_STATE))));
    let app = server::callback_app("/auth/callback", auth, Arc::clone(&pending));
    (app, pending)
}

async fn visit(app: Router, uri: &str) -> String {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_listener_rejects_state_that_was_not_issued() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // Missing, different and truncated states are all rejected
    for uri in [
        "/auth/callback?code=abc".to_string(),
        "/auth/callback?code=abc&state=someone-elses-state".to_string(),
        format!("/auth/callback?code=abc&state={}", &ISSUED_STATE[..8]),
    ] {
        let (app, pending) = listener(&server);
        let page = visit(app, &uri).await;
        assert!(page.contains("state mismatch"));

        let guard = pending.lock().await;
        let login = guard.as_ref().unwrap();
        assert!(login.token.is_none());
        assert!(matches!(login.outcome(), Some(Err(_))));
    }
}

#[tokio::test]
async fn test_listener_stores_token_for_issued_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("code=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "token_type": "Bearer",
            "scope": "user-library-read",
            "expires_in": 3600,
            "refresh_token": "refresh-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (app, pending) = listener(&server);
    let page = visit(app, &format!("/auth/callback?code=abc&state={ISSUED_STATE}")).await;
    assert!(page.contains("Authentication successful"));

    let guard = pending.lock().await;
    let login = guard.as_ref().unwrap();
    assert_eq!(login.token.as_ref().unwrap().access_token, "access-1");
    assert!(matches!(login.outcome(), Some(Ok(token)) if token.refresh_token == "refresh-1"));
}

#[tokio::test]
async fn test_listener_records_rejected_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (app, pending) = listener(&server);
    visit(app, &format!("/auth/callback?code=stale&state={ISSUED_STATE}")).await;

    let guard = pending.lock().await;
    let login = guard.as_ref().unwrap();
    assert!(login.token.is_none());
    assert!(login.failure.is_some());
}

#[test]
fn test_pending_login_outcome() {
    let mut login = PendingLogin::new("s");
    assert!(login.outcome().is_none());

    login.failure = Some("state mismatch".into());
    assert_eq!(login.outcome(), Some(Err("state mismatch".to_string())));
}
