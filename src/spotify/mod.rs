//! # Spotify Integration Module
//!
//! Everything that talks to the remote music service lives here.
//!
//! - [`auth`] - authorization redirect, code exchange and token refresh
//!   against the accounts service ([`AuthClient`]).
//! - [`Gateway`] - bearer-authenticated calls to the resource API: profile,
//!   saved tracks, audio features, playlist creation and track addition.
//!
//! Neither type keeps tokens. The caller passes the access token into every
//! gateway call and holds on to whatever pair the auth client hands back.
//!
//! ## Error Handling
//!
//! - Token endpoint failures surface as [`crate::error::AuthError`]; a rejected
//!   authorization code is never retried since codes are single-use.
//! - Resource API failures surface as [`crate::error::GatewayError`] with the
//!   remote status code and body kept verbatim.
//! - Nothing in this module retries. A bounded refresh-and-retry-once policy
//!   is available client-side in [`crate::management::TokenManager`].
//!
//! ## API Coverage
//!
//! - `POST /api/token` - code exchange and refresh
//! - `GET /me` - user profile
//! - `GET /me/tracks` - saved tracks, offset paged
//! - `GET /audio-features` - audio features for several tracks
//! - `POST /users/{user_id}/playlists` - create playlist
//! - `POST /playlists/{playlist_id}/tracks` - add tracks

pub mod auth;
mod gateway;
mod playlist;
mod tracks;

pub use auth::{AuthClient, LoginRedirect};
pub use gateway::Gateway;
