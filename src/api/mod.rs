//! # API Module
//!
//! HTTP surface of vibelist, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - `GET /auth/login` - 302 to the authorization server with a fresh state
//! - `GET /auth/callback` - exchanges the code, 302 to the frontend dashboard
//!   with the token pair, or to the frontend with `error=state_mismatch` /
//!   `error=invalid_token`
//! - `POST /auth/refresh` - mints a new access token
//!
//! ### Resource API (bearer token required, 401 without)
//!
//! - `GET /spotify/me`
//! - `GET /spotify/tracks?limit&offset`
//! - `POST /spotify/audio-features`
//! - `POST /spotify/create-playlist`
//!
//! ### Monitoring
//!
//! - `GET /` and `GET /health`
//!
//! The service keeps no session: tokens travel with every request and are
//! handed straight back to the client after the exchange. Remote failures
//! answer with the remote status code and a JSON `{error, details?}` body.
//!
//! [`callback`] is the separate handler used by the CLI's local login
//! listener.

mod auth;
mod callback;
mod error;
mod health;
mod spotify;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;

use crate::{
    config::Config,
    spotify::{AuthClient, Gateway},
};

pub use auth::STATE_COOKIE;
pub use callback::callback;
pub use error::{ApiError, BearerToken};
pub use health::health;

/// Shared, read-only handles for the handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: AuthClient,
    pub gateway: Gateway,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = Client::new();
        Self {
            auth: AuthClient::new(http.clone(), &config),
            gateway: Gateway::from_config(http, &config),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/refresh", post(auth::refresh))
        .route("/spotify/me", get(spotify::me))
        .route("/spotify/tracks", get(spotify::tracks))
        .route("/spotify/audio-features", post(spotify::audio_features))
        .route("/spotify/create-playlist", post(spotify::create_playlist))
        .with_state(state)
}
