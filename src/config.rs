//! Configuration management for vibelist.
//!
//! Values come from the process environment, optionally seeded from `.env`
//! files. The loaded [`Config`] is handed to every component explicitly so
//! nothing reads the environment after startup.
//!
//! Lookup order for `.env` files:
//! 1. `.env` in the working directory
//! 2. `.env` in the local data directory (`~/.local/share/vibelist/.env` on Linux)
//!
//! Variables already present in the environment always win.

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-library-read playlist-modify-public playlist-modify-private user-top-read";
/// Largest page the saved-tracks endpoint accepts.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub frontend_url: String,
    pub port: u16,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub scope: String,
    pub max_page_limit: u32,
    /// Reject callbacks that arrive without the issued-state cookie.
    pub strict_state: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.into());

        let port = match get("PORT") {
            Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };

        let max_page_limit = match get("TRACKS_PAGE_LIMIT") {
            Some(v) => match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "TRACKS_PAGE_LIMIT",
                        value: v,
                    });
                }
            },
            None => DEFAULT_PAGE_LIMIT,
        };

        let strict_state = match get("STRICT_STATE") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                name: "STRICT_STATE",
                value: v,
            })?,
            None => false,
        };

        Ok(Config {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI")?,
            frontend_url: or_default("FRONTEND_URL", DEFAULT_FRONTEND_URL)
                .trim_end_matches('/')
                .to_string(),
            port,
            auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            scope: or_default("SPOTIFY_SCOPE", DEFAULT_SCOPE),
            max_page_limit,
            strict_state,
        })
    }

    /// Origins allowed to call the HTTP service from a browser.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![DEFAULT_FRONTEND_URL.to_string()];
        if self.frontend_url != DEFAULT_FRONTEND_URL {
            origins.push(self.frontend_url.clone());
        }
        origins
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Loads `.env` files into the process environment.
///
/// Creates the local data directory if it is missing so users have a known
/// place to drop their `.env`. Missing files are skipped.
pub async fn load_env() -> Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Root of everything vibelist keeps on the local machine.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("vibelist");
    path
}
