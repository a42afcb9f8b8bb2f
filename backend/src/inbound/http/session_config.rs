//! Session configuration parsing and validation.
//!
//! The session cookie is encrypted and signed with a key derived from
//! `SECRET_KEY`. The process refuses to start without it.

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;


pub mod fingerprint;

/// Environment variable holding the session secret.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
/// Environment variable toggling the `Secure` cookie attribute.
pub const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
/// Minimum secret length accepted by cookie key derivation.
pub const SECRET_KEY_MIN_LEN: usize = 32;
/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";
/// Lifetime of a session cookie after login, in hours.
pub const SESSION_TTL_HOURS: i64 = 2;

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Session settings derived from the environment.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The secret is too short to derive a cookie key from.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Build session settings from environment variables.
///
/// # Examples
///
/// ```rust
/// use donations::inbound::http::session_config::session_settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string()
///     .returning(|name| (name == "SECRET_KEY").then(|| "k".repeat(32)));
///
/// let settings = session_settings_from_env(&env).unwrap();
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure_from_env(env)?;
    let key = session_key_from_env(env)?;
    Ok(SessionSettings { key, cookie_secure })
}

fn cookie_secure_from_env<E: Env>(env: &E) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(COOKIE_SECURE_ENV) else {
        return Ok(true);
    };
    let flag = parse_bool(&value).ok_or_else(|| SessionConfigError::InvalidEnv {
        name: COOKIE_SECURE_ENV,
        value: value.clone(),
        expected: BOOL_EXPECTED,
    })?;
    if !flag {
        warn!("SESSION_COOKIE_SECURE=0; session cookies will be sent over plain HTTP");
    }
    Ok(flag)
}

fn session_key_from_env<E: Env>(env: &E) -> Result<Key, SessionConfigError> {
    let secret = env.string(SECRET_KEY_ENV).ok_or(SessionConfigError::MissingEnv {
        name: SECRET_KEY_ENV,
    })?;
    let mut bytes = secret.into_bytes();
    let length = bytes.len();
    if length < SECRET_KEY_MIN_LEN {
        bytes.zeroize();
        return Err(SessionConfigError::KeyTooShort {
            name: SECRET_KEY_ENV,
            length,
            min_len: SECRET_KEY_MIN_LEN,
        });
    }
    let key = Key::derive_from(&bytes);
    bytes.zeroize();
    Ok(key)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Build the cookie session middleware for `settings`.
///
/// Cookies are private (encrypted), HTTP-only, `SameSite=Lax` and expire
/// after [`SESSION_TTL_HOURS`].
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
        )
        .build()
}
