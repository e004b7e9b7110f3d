use std::fmt;

use crate::{
    error::{AssemblyError, GatewayError},
    spotify::Gateway,
    types::{CreatePlaylistRequest, PlaylistRequest, PlaylistResult},
    utils,
};

/// Progress of one assembly.
///
/// `Idle -> Creating -> Populating -> Done`, or `Failed` from any step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    Idle,
    Creating,
    Populating,
    Done,
    Failed,
}

impl fmt::Display for AssemblyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssemblyState::Idle => "idle",
            AssemblyState::Creating => "creating",
            AssemblyState::Populating => "populating",
            AssemblyState::Done => "done",
            AssemblyState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Creates a playlist and fills it, strictly in that order.
///
/// The two remote calls are not transactional. When filling fails the
/// playlist stays behind, empty, and is reported through
/// [`AssemblyError::Populate`] so the caller can call
/// [`PlaylistAssembler::populate`] again instead of creating a duplicate.
///
/// One assembler drives one assembly; concurrent assemblies use separate
/// assemblers and know nothing of each other.
pub struct PlaylistAssembler<'a> {
    gateway: &'a Gateway,
    state: AssemblyState,
}

impl<'a> PlaylistAssembler<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self {
            gateway,
            state: AssemblyState::Idle,
        }
    }

    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// Checks everything that can be checked without the network.
    pub fn validate(request: &PlaylistRequest) -> Result<(), AssemblyError> {
        Self::validate_contents(&request.name, &request.track_uris)?;
        if request.owner_id.trim().is_empty() {
            return Err(AssemblyError::Validation("owner id must not be empty".into()));
        }
        Ok(())
    }

    /// Name and track checks alone, for callers that still have to look
    /// up the owner.
    pub fn validate_contents(name: &str, track_uris: &[String]) -> Result<(), AssemblyError> {
        if name.trim().is_empty() {
            return Err(AssemblyError::Validation(
                "playlist name must not be empty".into(),
            ));
        }
        if track_uris.is_empty() {
            return Err(AssemblyError::Validation(
                "no tracks to add to the playlist".into(),
            ));
        }
        Ok(())
    }

    pub async fn assemble(
        &mut self,
        token: &str,
        request: &PlaylistRequest,
    ) -> Result<PlaylistResult, AssemblyError> {
        if let Err(e) = Self::validate(request) {
            self.transition(AssemblyState::Failed);
            return Err(e);
        }

        self.transition(AssemblyState::Creating);
        let details = CreatePlaylistRequest {
            name: request.name.trim().to_string(),
            description: request.description.clone(),
            public: request.public,
        };
        let playlist = match self
            .gateway
            .create_playlist(token, &request.owner_id, &details)
            .await
        {
            Ok(playlist) => playlist,
            Err(e) => {
                self.transition(AssemblyState::Failed);
                return Err(AssemblyError::Create(e));
            }
        };

        self.populate(token, playlist, &request.track_uris).await
    }

    /// Adds `uris` to an already created playlist.
    pub async fn populate(
        &mut self,
        token: &str,
        playlist: PlaylistResult,
        uris: &[String],
    ) -> Result<PlaylistResult, AssemblyError> {
        if uris.is_empty() {
            self.transition(AssemblyState::Failed);
            return Err(AssemblyError::Populate {
                playlist,
                source: GatewayError::Validation("no tracks to add to the playlist".into()),
            });
        }

        self.transition(AssemblyState::Populating);
        match self.gateway.add_tracks(token, &playlist.id, uris).await {
            Ok(_) => {
                self.transition(AssemblyState::Done);
                tracing::info!(
                    playlist = utils::short_id(&playlist.id),
                    tracks = uris.len(),
                    "playlist assembled"
                );
                Ok(playlist)
            }
            Err(source) => {
                self.transition(AssemblyState::Failed);
                tracing::warn!(
                    playlist = utils::short_id(&playlist.id),
                    "playlist created but left empty"
                );
                Err(AssemblyError::Populate { playlist, source })
            }
        }
    }

    fn transition(&mut self, next: AssemblyState) {
        tracing::debug!(from = %self.state, to = %next, "playlist assembly");
        self.state = next;
    }
}
