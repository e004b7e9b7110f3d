mod common;

use common::test_config;
use reqwest::Client;
use serde_json::json;
use url::Url;
use vibelist::{error::AuthError, spotify::AuthClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, body_string_contains, method, path},
};

fn auth_client(server: &MockServer) -> AuthClient {
    AuthClient::new(Client::new(), &test_config(&server.uri()))
}

#[tokio::test]
async fn test_initiate_login_builds_authorize_url() {
    let server = MockServer::start().await;
    let auth = auth_client(&server);

    let redirect = auth.initiate_login().unwrap();
    let url = Url::parse(&redirect.url).unwrap();
    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    };

    assert_eq!(url.path(), "/authorize");
    assert_eq!(param("response_type").as_deref(), Some("code"));
    assert_eq!(param("client_id").as_deref(), Some("client-id"));
    assert_eq!(
        param("redirect_uri").as_deref(),
        Some("http://127.0.0.1:5001/auth/callback")
    );
    assert!(param("scope").unwrap().contains("user-library-read"));
    assert_eq!(param("state").as_deref(), Some(redirect.state.as_str()));
    assert_eq!(redirect.state.len(), 16);

    // A fresh state per login
    assert_ne!(auth.initiate_login().unwrap().state, redirect.state);
}

#[tokio::test]
async fn test_exchange_code_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(basic_auth("client-id", "client-secret"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=the-code"))
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

    let token = auth_client(&server)
        .exchange_code(Some("the-code"), Some("state"))
        .await
        .unwrap();

    assert_eq!(token.access_token, "access-1");
    assert_eq!(token.refresh_token, "refresh-1");
    assert_eq!(token.expires_in, 3600);
    assert_eq!(token.expires_at(), token.obtained_at + 3600);
}

#[tokio::test]
async fn test_exchange_code_without_state_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = auth_client(&server);
    let missing = auth.exchange_code(Some("code"), None).await;
    assert!(matches!(missing, Err(AuthError::StateMismatch)));

    let empty = auth.exchange_code(Some("code"), Some("")).await;
    assert!(matches!(empty, Err(AuthError::StateMismatch)));

    let no_code = auth.exchange_code(None, Some("state")).await;
    assert!(matches!(no_code, Err(AuthError::MissingCode)));
}

#[tokio::test]
async fn test_rejected_code_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = auth_client(&server)
        .exchange_code(Some("used-code"), Some("state"))
        .await
        .unwrap_err();

    match err {
        AuthError::Upstream { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body["error"], "invalid_grant");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_omitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "token_type": "Bearer",
            "scope": "user-library-read",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&server)
        .await;

    let auth = auth_client(&server);
    let first = auth.refresh("refresh-1").await.unwrap();
    assert_eq!(first.access_token, "access-2");
    assert_eq!(first.refresh_token, "refresh-1");

    // Repeating a refresh is harmless
    let second = auth.refresh("refresh-1").await.unwrap();
    assert_eq!(second.access_token, "access-2");
}

#[tokio::test]
async fn test_revoked_refresh_token_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Refresh token revoked"
        })))
        .mount(&server)
        .await;

    let err = auth_client(&server).refresh("revoked").await.unwrap_err();
    assert!(matches!(err, AuthError::Upstream { status: 400, .. }));
}

#[tokio::test]
async fn test_malformed_token_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let err = auth_client(&server).refresh("refresh-1").await.unwrap_err();
    assert!(matches!(err, AuthError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_empty_refresh_token_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = auth_client(&server).refresh("  ").await.unwrap_err();
    assert!(matches!(err, AuthError::MissingRefreshToken));
}
