use std::path::PathBuf;

use crate::{
    config,
    error::SessionError,
    management::TokenManager,
    spotify::{AuthClient, Gateway},
    types::{Paging, SavedTrack, Track},
    vibe::{self, Vibe},
};

/// Saved tracks fetched for this session plus the vibe currently selected.
///
/// The full list is never replaced by a filtered one, so selecting a new
/// vibe always filters from everything that was fetched.
pub struct TrackLibrary {
    tracks: Vec<Track>,
    vibe: Vibe,
}

impl TrackLibrary {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            vibe: Vibe::All,
        }
    }

    /// Fetches saved tracks page by page until the listing has no `next`
    /// page or `max` tracks were collected.
    ///
    /// Pages are requested one after the other. `progress` gets the number
    /// fetched so far and the reported total after every page.
    pub async fn fetch(
        gateway: &Gateway,
        auth: &AuthClient,
        tokens: &mut TokenManager,
        max: Option<u32>,
        mut progress: impl FnMut(u32, u32),
    ) -> Result<Self, SessionError> {
        let page_size = gateway.max_page_limit();
        let mut tracks = Vec::new();
        let mut offset: u32 = 0;

        loop {
            let limit = match max {
                Some(max) => page_size.min(max.saturating_sub(tracks.len() as u32)),
                None => page_size,
            };
            if limit == 0 {
                break;
            }

            let page: Paging<SavedTrack> = tokens
                .with_refresh(auth, |token| async move {
                    gateway
                        .get_saved_tracks::<Paging<SavedTrack>>(&token, limit, offset)
                        .await
                })
                .await?;

            let fetched = page.items.len() as u32;
            tracks.extend(page.items.into_iter().map(|saved| saved.track));
            offset += fetched;
            progress(offset, page.total);

            if fetched == 0 || page.next.is_none() {
                break;
            }
        }

        Ok(Self::new(tracks))
    }

    pub async fn load() -> Result<Self, SessionError> {
        let content = async_fs::read_to_string(Self::cache_path()).await?;
        let tracks: Vec<Track> = serde_json::from_str(&content)?;
        Ok(Self::new(tracks))
    }

    pub async fn persist(&self) -> Result<(), SessionError> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.tracks)?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Makes `vibe` the current selection and returns its tracks.
    pub fn select(&mut self, vibe: Vibe) -> Vec<&Track> {
        self.vibe = vibe;
        self.selected()
    }

    pub fn selected(&self) -> Vec<&Track> {
        vibe::filter_by_vibe(&self.tracks, self.vibe)
    }

    pub fn vibe(&self) -> Vibe {
        self.vibe
    }

    pub fn all(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Keeps only the first `max` tracks.
    pub fn truncate(&mut self, max: usize) {
        self.tracks.truncate(max);
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    fn cache_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/saved-tracks.json");
        path
    }
}
