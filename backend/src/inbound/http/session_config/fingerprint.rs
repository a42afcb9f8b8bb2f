//! Session key fingerprinting for operational visibility.
//!
//! A truncated SHA-256 of the signing material lets operators confirm which
//! `SECRET_KEY` is active without exposing it.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Return the first 8 bytes of `SHA-256(key.signing())` as lowercase hex.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use donations::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_stable_for_a_secret() {
        let secret = [b'a'; 32];
        assert_eq!(
            key_fingerprint(&Key::derive_from(&secret)),
            key_fingerprint(&Key::derive_from(&secret))
        );
    }

    #[rstest]
    fn fingerprint_is_sixteen_lowercase_hex_chars() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[rstest]
    fn different_secrets_differ() {
        let a = key_fingerprint(&Key::derive_from(&[b'a'; 32]));
        let b = key_fingerprint(&Key::derive_from(&[b'b'; 32]));
        assert_ne!(a, b);
    }
}
