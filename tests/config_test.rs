use std::collections::HashMap;

use vibelist::{
    config::{self, Config},
    error::ConfigError,
};

fn from_vars(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

const REQUIRED: [(&str, &str); 3] = [
    ("CLIENT_ID", "id"),
    ("CLIENT_SECRET", "secret"),
    ("REDIRECT_URI", "http://localhost:5001/auth/callback"),
];

fn with_required<'a>(extra: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    let mut vars = REQUIRED.to_vec();
    vars.extend_from_slice(extra);
    vars
}

#[test]
fn test_defaults() {
    let config = from_vars(&REQUIRED).unwrap();

    assert_eq!(config.port, config::DEFAULT_PORT);
    assert_eq!(config.frontend_url, "http://localhost:3000");
    assert_eq!(config.api_url, config::DEFAULT_API_URL);
    assert_eq!(config.token_url, config::DEFAULT_TOKEN_URL);
    assert_eq!(config.max_page_limit, 50);
    assert!(!config.strict_state);
    assert!(config.scope.contains("playlist-modify-private"));
    assert_eq!(config.allowed_origins(), vec!["http://localhost:3000"]);
}

#[test]
fn test_missing_required_values() {
    for missing in ["CLIENT_ID", "CLIENT_SECRET", "REDIRECT_URI"] {
        let vars: Vec<_> = REQUIRED
            .iter()
            .copied()
            .filter(|(k, _)| *k != missing)
            .collect();
        assert!(matches!(
            from_vars(&vars),
            Err(ConfigError::Missing(name)) if name == missing
        ));
    }
}

#[test]
fn test_empty_value_counts_as_unset() {
    let vars = with_required(&[("CLIENT_SECRET", "  "), ("PORT", "")]);
    // Later entries overwrite earlier ones in the lookup map
    assert!(matches!(
        from_vars(&vars),
        Err(ConfigError::Missing("CLIENT_SECRET"))
    ));
}

#[test]
fn test_overrides() {
    let vars = with_required(&[
        ("PORT", "8080"),
        ("FRONTEND_URL", "https://vibes.example/"),
        ("SPOTIFY_API_URL", "http://127.0.0.1:9000/v1/"),
        ("TRACKS_PAGE_LIMIT", "20"),
        ("STRICT_STATE", "yes"),
    ]);
    let config = from_vars(&vars).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.frontend_url, "https://vibes.example");
    assert_eq!(config.api_url, "http://127.0.0.1:9000/v1");
    assert_eq!(config.max_page_limit, 20);
    assert!(config.strict_state);
    assert_eq!(
        config.allowed_origins(),
        vec!["http://localhost:3000", "https://vibes.example"]
    );
}

#[test]
fn test_invalid_values() {
    for (name, value) in [
        ("PORT", "not-a-port"),
        ("PORT", "70000"),
        ("TRACKS_PAGE_LIMIT", "0"),
        ("STRICT_STATE", "maybe"),
    ] {
        let vars = with_required(&[(name, value)]);
        assert!(
            matches!(from_vars(&vars), Err(ConfigError::Invalid { name: n, .. }) if n == name),
            "{name}={value}"
        );
    }
}
