use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use crate::{
    config::Config,
    error, info,
    management::{TokenManager, TrackLibrary},
    spotify::{AuthClient, Gateway},
    success, warning,
};

/// Remote handles plus the cached token, as used by every CLI command
/// that talks to the resource API.
pub struct Session {
    pub auth: AuthClient,
    pub gateway: Gateway,
    pub tokens: TokenManager,
}

impl Session {
    pub async fn open(config: &Config) -> Self {
        let tokens = match TokenManager::load().await {
            Ok(t) => t,
            Err(e) => error!(
                "Failed to load token. Please run vibelist auth\n Error: {}",
                e
            ),
        };

        let http = Client::new();
        Session {
            auth: AuthClient::new(http.clone(), config),
            gateway: Gateway::from_config(http, config),
            tokens,
        }
    }

    /// Fetches saved tracks page by page, at most `max` of them, and caches
    /// them.
    pub async fn fetch_library(&mut self, max: Option<u32>) -> TrackLibrary {
        let pb = spinner("Fetching saved tracks...");
        let fetched = TrackLibrary::fetch(
            &self.gateway,
            &self.auth,
            &mut self.tokens,
            max,
            |fetched, total| {
                pb.set_message(format!("Fetched {fetched} of {total} saved tracks..."))
            },
        )
        .await;
        pb.finish_and_clear();

        let library = match fetched {
            Ok(library) => library,
            Err(e) => error!("Failed to fetch saved tracks: {}", e),
        };
        if let Err(e) = library.persist().await {
            warning!("Failed to cache saved tracks: {}", e);
        }
        success!("Fetched {} saved tracks", library.len());
        library
    }
}

/// Cached library, or a fresh fetch when there is none or `refresh` is set.
pub async fn library(config: &Config, max: Option<u32>, refresh: bool) -> TrackLibrary {
    if !refresh {
        match TrackLibrary::load().await {
            Ok(mut library) => {
                if let Some(max) = max {
                    library.truncate(max as usize);
                }
                return library;
            }
            Err(_) => info!("No cached tracks found, fetching from Spotify"),
        }
    }

    Session::open(config).await.fetch_library(max).await
}

pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
