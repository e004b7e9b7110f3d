use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    spotify::AuthClient,
    types::{AuthorizationGrant, PendingLogin},
    utils, warning,
};

/// Callback for logins started by `vibelist auth`.
///
/// The issued state lives in the same process, so it is compared in full
/// rather than only checked for presence.
pub async fn callback(
    Query(grant): Query<AuthorizationGrant>,
    Extension(auth): Extension<AuthClient>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
) -> Html<&'static str> {
    let mut pending = shared_state.lock().await;
    let Some(login) = pending.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    let state_matches = grant
        .state
        .as_deref()
        .is_some_and(|s| utils::constant_time_eq(s, &login.state));
    if !state_matches {
        warning!("Callback state does not match the issued one.");
        login.failure = Some("state mismatch".into());
        return Html("<h4>Login failed: state mismatch.</h4>");
    }

    match auth
        .exchange_code(grant.code.as_deref(), grant.state.as_deref())
        .await
    {
        Ok(token) => {
            login.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            login.failure = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
