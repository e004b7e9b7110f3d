use serde::de::DeserializeOwned;

use super::Gateway;
use crate::{error::GatewayError, types::UserProfile};

impl Gateway {
    /// Profile of the user owning `token`.
    pub async fn get_profile(&self, token: &str) -> Result<UserProfile, GatewayError> {
        self.execute(self.get(token, &["me"])?).await
    }

    /// One page of the user's saved tracks, decoded as `T`.
    ///
    /// `T` is `Paging<SavedTrack>` for callers that work with the tracks and
    /// `serde_json::Value` for callers that hand the page on untouched.
    /// `limit` and `offset` are forwarded unchanged; fetching further pages
    /// is up to the caller. A `limit` of zero or above the configured
    /// maximum is rejected before any request is made.
    pub async fn get_saved_tracks<T: DeserializeOwned>(
        &self,
        token: &str,
        limit: u32,
        offset: u32,
    ) -> Result<T, GatewayError> {
        if limit == 0 || limit > self.max_page_limit() {
            return Err(GatewayError::Validation(format!(
                "limit must be between 1 and {}",
                self.max_page_limit()
            )));
        }

        let request = self
            .get(token, &["me", "tracks"])?
            .query(&[("limit", limit), ("offset", offset)]);
        self.execute(request).await
    }

    /// Audio features for `ids`, in request order, decoded as `T`
    /// (`AudioFeaturesResponse` or `serde_json::Value`).
    pub async fn get_audio_features<T: DeserializeOwned>(
        &self,
        token: &str,
        ids: &[String],
    ) -> Result<T, GatewayError> {
        if ids.is_empty() {
            return Err(GatewayError::EmptyRequest);
        }

        tracing::debug!(count = ids.len(), "fetching audio features");
        let request = self
            .get(token, &["audio-features"])?
            .query(&[("ids", ids.join(","))]);
        self.execute(request).await
    }
}
