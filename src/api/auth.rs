use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use url::form_urlencoded;

use super::{ApiError, AppState};
use crate::{
    error::AuthError,
    types::{AuthorizationGrant, Token, TokenResponse},
    utils,
};

/// Cookie holding the digest of the state issued at login.
pub const STATE_COOKIE: &str = "vibelist_auth_state";
const STATE_COOKIE_MAX_AGE_SECS: u32 = 600;

/// `GET /auth/login`: 302 to the authorization server.
pub async fn login(State(state): State<AppState>) -> Response {
    let redirect = match state.auth.initiate_login() {
        Ok(redirect) => redirect,
        Err(e) => {
            tracing::error!("cannot build login redirect: {e}");
            return login_failed();
        }
    };
    let Some(digest) = state.auth.state_digest(&redirect.state) else {
        tracing::error!("cannot sign login state");
        return login_failed();
    };

    let cookie = format!(
        "{STATE_COOKIE}={digest}; Max-Age={STATE_COOKIE_MAX_AGE_SECS}; Path=/auth; HttpOnly; SameSite=Lax"
    );

    tracing::info!("redirecting to authorization server");
    found(redirect.url, cookie)
}

fn login_failed() -> Response {
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to start login").into_response()
}

/// `GET /auth/callback`: exchanges the code and hands the tokens to the
/// frontend through the query string.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(grant): Query<AuthorizationGrant>,
) -> Response {
    let frontend = &state.config.frontend_url;
    let issued = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|c| utils::cookie_value(c, STATE_COOKIE));

    let result = match check_state(&state, grant.state.as_deref(), issued) {
        Ok(()) => {
            state
                .auth
                .exchange_code(grant.code.as_deref(), grant.state.as_deref())
                .await
        }
        Err(e) => Err(e),
    };

    let clear_cookie = format!("{STATE_COOKIE}=; Max-Age=0; Path=/auth; HttpOnly; SameSite=Lax");
    match result {
        Ok(token) => {
            tracing::info!("authorization code exchanged");
            found(dashboard_url(frontend, &token), clear_cookie)
        }
        Err(AuthError::StateMismatch) => {
            tracing::warn!("callback rejected: state mismatch");
            found(format!("{frontend}?error=state_mismatch"), clear_cookie)
        }
        Err(e) => {
            if let Some(reason) = &grant.error {
                tracing::warn!(reason = %reason, "authorization denied");
            }
            tracing::warn!("callback failed: {e}");
            found(format!("{frontend}?error=invalid_token"), clear_cookie)
        }
    }
}

/// State must be present. When the login cookie came back it must match;
/// without it the callback is accepted unless strict state checking is on.
fn check_state(
    state: &AppState,
    returned: Option<&str>,
    issued_digest: Option<&str>,
) -> Result<(), AuthError> {
    let returned = returned
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::StateMismatch)?;

    match issued_digest {
        Some(digest) if state.auth.verify_state_digest(returned, digest) => Ok(()),
        Some(_) => Err(AuthError::StateMismatch),
        None if state.config.strict_state => Err(AuthError::StateMismatch),
        None => Ok(()),
    }
}

fn dashboard_url(frontend: &str, token: &Token) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("access_token", &token.access_token)
        .append_pair("refresh_token", &token.refresh_token)
        .append_pair("expires_in", &token.expires_in.to_string())
        .finish();
    format!("{frontend}/dashboard?{query}")
}

fn found(location: String, cookie: String) -> Response {
    (
        StatusCode::FOUND,
        [(LOCATION, location), (SET_COOKIE, cookie)],
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// `POST /auth/refresh`: returns the token endpoint answer verbatim.
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let refresh_token = payload
        .ok()
        .and_then(|Json(body)| body.refresh_token)
        .unwrap_or_default();

    state
        .auth
        .refresh_raw(&refresh_token)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::warn!("token refresh failed: {e}");
            ApiError::bad_request("Failed to refresh token")
        })
}
