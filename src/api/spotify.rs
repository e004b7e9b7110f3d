use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;
use serde_json::Value;

use super::{ApiError, AppState, BearerToken};
use crate::{
    config::DEFAULT_PAGE_LIMIT,
    management::PlaylistAssembler,
    types::{DEFAULT_PLAYLIST_DESCRIPTION, PlaylistRequest, PlaylistResult, UserProfile},
};

/// `GET /spotify/me`
pub async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .gateway
        .get_profile(&token)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(e, "Failed to fetch user profile"))
}

#[derive(Debug, Deserialize)]
pub struct TracksQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// `GET /spotify/tracks?limit&offset`: the remote page, passed through as is.
pub async fn tracks(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    query: Result<Query<TracksQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_LIMIT.min(state.gateway.max_page_limit()));
    let offset = query.offset.unwrap_or(0);

    state
        .gateway
        .get_saved_tracks::<Value>(&token, limit, offset)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(e, "Failed to fetch tracks"))
}

#[derive(Debug, Deserialize)]
pub struct AudioFeaturesBody {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// `POST /spotify/audio-features`: the remote answer, passed through as is.
pub async fn audio_features(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    payload: Result<Json<AudioFeaturesBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    state
        .gateway
        .get_audio_features::<Value>(&token, &body.ids)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_gateway(e, "Failed to fetch audio features"))
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub track_uris: Vec<String>,
}

/// `POST /spotify/create-playlist`: create, then populate.
pub async fn create_playlist(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    payload: Result<Json<CreatePlaylistBody>, JsonRejection>,
) -> Result<Json<PlaylistResult>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    PlaylistAssembler::validate_contents(&body.name, &body.track_uris)
        .map_err(ApiError::from_assembly)?;

    let owner_id = match body.user_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => {
            state
                .gateway
                .get_profile(&token)
                .await
                .map_err(|e| ApiError::from_gateway(e, "Failed to fetch user profile"))?
                .id
        }
    };

    let request = PlaylistRequest {
        owner_id,
        name: body.name,
        description: body
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYLIST_DESCRIPTION.to_string()),
        public: body.public,
        track_uris: body.track_uris,
    };

    PlaylistAssembler::new(&state.gateway)
        .assemble(&token, &request)
        .await
        .map(Json)
        .map_err(ApiError::from_assembly)
}
