use super::Gateway;
use crate::{
    error::GatewayError,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        PlaylistResult,
    },
};

impl Gateway {
    /// Creates an empty playlist owned by `owner_id`.
    pub async fn create_playlist(
        &self,
        token: &str,
        owner_id: &str,
        details: &CreatePlaylistRequest,
    ) -> Result<PlaylistResult, GatewayError> {
        let request = self.post(token, &["users", owner_id, "playlists"])?;
        self.execute(request.json(details)).await
    }

    /// Appends `uris` to a playlist in a single request, keeping their order.
    pub async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse, GatewayError> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let request = self.post(token, &["playlists", playlist_id, "tracks"])?;
        self.execute(request.json(&body)).await
    }
}
