use std::{net::SocketAddr, sync::Arc};

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use url::Url;

use crate::{
    Res,
    api::{self, AppState},
    config::Config,
    spotify::AuthClient,
    types::PendingLogin,
};

/// Full HTTP service: routes plus CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin: {e}");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    api::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("server is running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Temporary listener for `vibelist auth`, bound to the host, port and
/// path of the configured redirect URI.
pub async fn start_callback_server(
    auth: AuthClient,
    state: Arc<Mutex<Option<PendingLogin>>>,
) -> Res<()> {
    let redirect = Url::parse(auth.redirect_uri())?;
    let host = redirect.host_str().unwrap_or("127.0.0.1").to_string();
    let port = redirect.port_or_known_default().unwrap_or(80);
    let app = callback_app(redirect.path(), auth, state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Routes of the login listener, with the callback served at `path`.
pub fn callback_app(
    path: &str,
    auth: AuthClient,
    state: Arc<Mutex<Option<PendingLogin>>>,
) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(path, get(api::callback))
        .layer(Extension(auth))
        .layer(Extension(state))
}
