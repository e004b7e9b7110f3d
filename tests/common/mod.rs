#![allow(dead_code)]

use std::collections::HashMap;

use serde_json::Map;
use vibelist::{
    config::Config,
    types::{Album, Artist, Track},
};

// Helper function to build a config pointing every remote at `base`
pub fn test_config(base: &str) -> Config {
    test_config_with(base, &[])
}

pub fn test_config_with(base: &str, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("CLIENT_ID".into(), "client-id".into()),
        ("CLIENT_SECRET".into(), "client-secret".into()),
        (
            "REDIRECT_URI".into(),
            "http://127.0.0.1:5001/auth/callback".into(),
        ),
        ("FRONTEND_URL".into(), "http://frontend.test".into()),
        ("SPOTIFY_AUTH_URL".into(), format!("{base}/authorize")),
        ("SPOTIFY_TOKEN_URL".into(), format!("{base}/api/token")),
        ("SPOTIFY_API_URL".into(), format!("{base}/v1")),
    ]);
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }

    Config::from_lookup(|name| vars.get(name).cloned()).expect("test config is valid")
}

// Helper function to create a test track
pub fn track(id: &str, popularity: u8, duration_ms: u64) -> Track {
    Track {
        id: Some(id.to_string()),
        uri: format!("spotify:track:{id}"),
        name: format!("Track {id}"),
        artists: vec![Artist {
            id: Some(format!("{id}_artist")),
            name: "Artist".to_string(),
            genres: Vec::new(),
            extra: Map::new(),
        }],
        album: Album {
            id: Some(format!("{id}_album")),
            name: "Album".to_string(),
            extra: Map::new(),
        },
        popularity,
        duration_ms,
        extra: Map::new(),
    }
}

pub fn minutes(m: f64) -> u64 {
    (m * 60_000.0).round() as u64
}
