//! Error types for every layer of vibelist.
//!
//! Each layer owns its own enum so callers can tell a local validation
//! failure (nothing left the process) from a rejection by the remote
//! service (whose status code is kept verbatim).

use serde_json::Value;
use thiserror::Error;

use crate::types::PlaylistResult;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Failures of the token endpoint flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The callback carried no `state` or it did not match the issued one.
    #[error("state mismatch")]
    StateMismatch,

    #[error("authorization code missing from callback")]
    MissingCode,

    #[error("refresh token missing")]
    MissingRefreshToken,

    /// The token endpoint answered with a non-2xx status. Not retried.
    #[error("token endpoint rejected the request with status {status}")]
    Upstream { status: u16, body: Value },

    #[error("malformed token endpoint response: {0}")]
    MalformedResponse(String),

    #[error("token endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Failures of calls against the resource API.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("request contains no ids")]
    EmptyRequest,

    /// Non-2xx answer; status and body are passed through untouched.
    #[error("remote service answered with status {status}")]
    Remote { status: u16, body: Value },

    /// No response at all, or one that could not be decoded.
    #[error("unknown gateway error: {0}")]
    Unknown(String),
}

impl GatewayError {
    /// Status code the caller should see for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::Validation(_) | GatewayError::EmptyRequest => 400,
            GatewayError::Remote { status, .. } => *status,
            GatewayError::Unknown(_) => 500,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GatewayError::Remote { status: 401, .. })
    }
}

/// Failures of the create-then-populate playlist sequence.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("invalid playlist request: {0}")]
    Validation(String),

    /// Nothing was created remotely.
    #[error("failed to create playlist: {0}")]
    Create(#[source] GatewayError),

    /// The playlist exists remotely but is empty. It is not rolled back;
    /// population can be retried against `playlist`.
    #[error("playlist {} was created but adding tracks failed: {source}", .playlist.id)]
    Populate {
        playlist: PlaylistResult,
        #[source]
        source: GatewayError,
    },
}

/// Failures of the client-held session (token and track caches).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cache i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache is corrupt: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
