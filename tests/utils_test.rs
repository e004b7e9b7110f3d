use vibelist::utils::*;

#[test]
fn test_generate_state() {
    let state = generate_state(STATE_LENGTH);

    assert_eq!(state.len(), 16);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated states should be different
    assert_ne!(state, generate_state(STATE_LENGTH));
}

#[test]
fn test_state_digest() {
    let digest = state_digest("secret", "abc123").unwrap();

    // Deterministic for the same secret and state
    assert_eq!(Some(&digest), state_digest("secret", "abc123").as_ref());

    // Depends on both inputs
    assert_ne!(Some(&digest), state_digest("secret", "abc124").as_ref());
    assert_ne!(Some(&digest), state_digest("other-secret", "abc123").as_ref());

    // URL-safe base64 without padding, 32 bytes -> 43 chars
    assert_eq!(digest.len(), 43);
    assert!(
        digest
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_state_digest_is_hmac_sha256() {
    // RFC 4231 test case 2, base64url-encoded
    assert_eq!(
        state_digest("Jefe", "what do ya want for nothing?").as_deref(),
        Some("W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM")
    );
}

#[test]
fn test_verify_state_digest() {
    let digest = state_digest("secret", "abc123").unwrap();

    assert!(verify_state_digest("secret", "abc123", &digest));
    assert!(!verify_state_digest("secret", "abc124", &digest));
    assert!(!verify_state_digest("other-secret", "abc123", &digest));
    assert!(!verify_state_digest("secret", "abc123", &digest[..42]));
    assert!(!verify_state_digest("secret", "abc123", "not base64!"));
    assert!(!verify_state_digest("secret", "abc123", ""));
}

#[test]
fn test_constant_time_eq() {
    assert!(constant_time_eq("abc", "abc"));
    assert!(!constant_time_eq("abc", "abd"));
    assert!(!constant_time_eq("abc", "abcd"));
    assert!(constant_time_eq("", ""));
}

#[test]
fn test_cookie_value() {
    let header = "theme=dark; vibelist_auth_state=xyz; other=1";
    assert_eq!(cookie_value(header, "vibelist_auth_state"), Some("xyz"));
    assert_eq!(cookie_value(header, "theme"), Some("dark"));
    assert_eq!(cookie_value(header, "missing"), None);
    assert_eq!(cookie_value("", "theme"), None);
}

#[test]
fn test_bearer_token() {
    assert_eq!(bearer_token("Bearer abc"), Some("abc"));
    assert_eq!(bearer_token("bearer abc"), Some("abc"));
    assert_eq!(bearer_token("Bearer   abc  "), Some("abc"));
    assert_eq!(bearer_token("Bearer "), None);
    assert_eq!(bearer_token("Basic abc"), None);
    assert_eq!(bearer_token("abc"), None);
}

#[test]
fn test_short_id() {
    assert_eq!(short_id("37i9dQZF1DXcBWIGoYBM5M"), "37i9dQZF");
    assert_eq!(short_id("abc"), "abc");
}
