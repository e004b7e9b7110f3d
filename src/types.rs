use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tabled::Tabled;

/// Access/refresh token pair held by the client.
///
/// `obtained_at` is a unix timestamp in seconds, taken when the pair was
/// issued, so the expiry can be checked later without the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Builds a pair from a token endpoint answer.
    ///
    /// A refresh answer may omit the refresh token, in which case the one
    /// used for the request stays valid and is carried over.
    pub fn from_response(response: &TokenResponse, previous_refresh: Option<&str>) -> Self {
        Token {
            access_token: response.access_token.clone(),
            refresh_token: response
                .refresh_token
                .clone()
                .or_else(|| previous_refresh.map(str::to_string))
                .unwrap_or_default(),
            scope: response.scope.clone().unwrap_or_default(),
            expires_in: response.expires_in,
            obtained_at: chrono::Utc::now().timestamp() as u64,
        }
    }

    pub fn expires_at(&self) -> u64 {
        self.obtained_at + self.expires_in
    }

    /// True when the access token expires within `leeway` seconds of `now`.
    pub fn expires_within(&self, now: u64, leeway: u64) -> bool {
        now + leeway >= self.expires_at()
    }
}

/// Raw answer of the token endpoint, echoed verbatim by `/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters of the authorization redirect. Used exactly once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizationGrant {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Login started by the CLI, waiting for the callback to complete it.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub state: String,
    pub token: Option<Token>,
    /// Set when the callback arrived but could not complete the login.
    pub failure: Option<String>,
}

impl PendingLogin {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            token: None,
            failure: None,
        }
    }

    /// `None` while the callback has not arrived yet.
    pub fn outcome(&self) -> Option<Result<Token, String>> {
        match (&self.token, &self.failure) {
            (Some(token), _) => Some(Ok(token.clone())),
            (None, Some(failure)) => Some(Err(failure.clone())),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// `None` for local files, which the remote library lists without an id.
    #[serde(default)]
    pub id: Option<String>,
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Album,
    /// 0 to 100.
    #[serde(default)]
    pub popularity: u8,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    pub fn duration_minutes(&self) -> f64 {
        self.duration_ms as f64 / 60_000.0
    }

    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn genres(&self) -> Vec<&str> {
        self.artists
            .iter()
            .flat_map(|a| a.genres.iter().map(String::as_str))
            .collect()
    }
}

/// Item of the saved-tracks listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrack {
    #[serde(default)]
    pub added_at: Option<String>,
    pub track: Track,
}

/// One page of an offset-paged listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeature {
    pub id: String,
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Unknown ids come back as `null` entries, in request order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeature>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// Playlist as echoed by the remote service on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistResult {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub const DEFAULT_PLAYLIST_DESCRIPTION: &str = "Created with vibelist";

/// Everything needed to create and fill one playlist.
#[derive(Debug, Clone)]
pub struct PlaylistRequest {
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub public: bool,
    pub track_uris: Vec<String>,
}

impl PlaylistRequest {
    pub fn from_tracks<'a>(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        tracks: impl IntoIterator<Item = &'a Track>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            description: description.unwrap_or_else(|| DEFAULT_PLAYLIST_DESCRIPTION.to_string()),
            public: false,
            track_uris: tracks.into_iter().map(|t| t.uri.clone()).collect(),
        }
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub popularity: u8,
    pub duration: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        let seconds = track.duration_ms / 1000;
        TrackTableRow {
            name: track.name.clone(),
            artists: track.artist_names(),
            popularity: track.popularity,
            duration: format!("{}:{:02}", seconds / 60, seconds % 60),
        }
    }
}
