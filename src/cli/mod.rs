//! # CLI Module
//!
//! Command-line client for vibelist. Unlike the HTTP service, the CLI is a
//! session holder: it keeps the token pair and the fetched track list in
//! the local data directory between runs.
//!
//! ## Commands
//!
//! - [`auth`] - browser login through a temporary local callback listener
//! - [`list_tracks`] - fetch (or load cached) saved tracks and show those
//!   matching a vibe
//! - [`playlist`] - create a playlist from the tracks matching a vibe
//!
//! ## Usage
//!
//! ```bash
//! vibelist auth
//! vibelist tracks --refresh
//! vibelist tracks --vibe chill
//! vibelist playlist --vibe party --name "Friday"
//! ```
//!
//! Calls that are safe to repeat go through
//! [`crate::management::TokenManager::with_refresh`], which refreshes and
//! retries once on a 401. Playlist assembly never does.

mod auth;
mod playlist;
mod session;
mod tracks;

pub use auth::auth;
pub use playlist::playlist;
pub use tracks::list_tracks;
