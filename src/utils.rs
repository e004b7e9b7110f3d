use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Length of the opaque anti-CSRF `state` sent with the login redirect.
pub const STATE_LENGTH: usize = 16;

/// Generates a random alphanumeric string of `length` characters.
///
/// # Example
///
/// ```
/// let state = generate_state(16);
/// assert_eq!(state.len(), 16);
/// ```
pub fn generate_state(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

type HmacSha256 = Hmac<Sha256>;

fn state_mac(secret: &str, state: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(state.as_bytes());
    Some(mac)
}

/// HMAC-SHA256 of an issued `state` keyed with `secret`, URL-safe base64
/// without padding.
///
/// Stored in the login cookie instead of the state itself, so the cookie
/// cannot be minted for an arbitrary state without knowing `secret`.
pub fn state_digest(secret: &str, state: &str) -> Option<String> {
    state_mac(secret, state).map(|mac| URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// Checks a cookie value produced by [`state_digest`] in constant time.
pub fn verify_state_digest(secret: &str, state: &str, digest: &str) -> bool {
    let Ok(tag) = URL_SAFE_NO_PAD.decode(digest) else {
        return false;
    };
    state_mac(secret, state).is_some_and(|mac| mac.verify_slice(&tag).is_ok())
}

/// Compares two strings in constant time.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Finds the value of cookie `name` in a raw `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Extracts the credential from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; an empty credential is treated
/// as absent.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Shortens an id for log output.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
