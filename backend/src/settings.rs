//! Process settings read from the environment at startup.
//!
//! Environment access goes through [`mockable::Env`] so parsing can be
//! tested with `MockEnv` instead of mutating the real process environment.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use mockable::Env;

/// TCP port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 6738;
/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "PORT";
/// Environment variable holding the PostgreSQL connection URL.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable capping the number of pooled database connections.
pub const DATABASE_MAX_CONNECTIONS_ENV: &str = "DATABASE_MAX_CONNECTIONS";
/// Environment variable holding the pool checkout timeout in whole seconds.
pub const DATABASE_CONNECT_TIMEOUT_ENV: &str = "DATABASE_CONNECT_TIMEOUT_SECS";
/// Pool size used when `DATABASE_MAX_CONNECTIONS` is unset.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;
/// Checkout timeout used when `DATABASE_CONNECT_TIMEOUT_SECS` is unset.
pub const DEFAULT_POOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while reading process settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// `PORT` is not a valid TCP port.
    #[error("invalid value for {name}='{value}'; expected a port number")]
    InvalidPort { name: &'static str, value: String },
    /// A pool setting is not a positive whole number.
    #[error("invalid value for {name}='{value}'; expected a positive whole number")]
    InvalidCount { name: &'static str, value: String },
}

/// Listener and database settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Port bound on all IPv4 interfaces.
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub pool_max_size: u32,
    /// How long a request waits for a pooled connection.
    pub pool_timeout: Duration,
}

impl AppSettings {
    /// Read settings from `env`.
    ///
    /// # Examples
    /// ```
    /// use donations::settings::AppSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DATABASE_URL" => Some("postgres://localhost/donations".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).unwrap();
    /// assert_eq!(settings.port, 6738);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let port = match env.string(PORT_ENV) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| SettingsError::InvalidPort {
                    name: PORT_ENV,
                    value,
                })?,
            None => DEFAULT_PORT,
        };
        let database_url = database_url_from_env(env)?;
        let pool_max_size =
            positive_count(env, DATABASE_MAX_CONNECTIONS_ENV)?.unwrap_or(DEFAULT_POOL_MAX_SIZE);
        let pool_timeout = positive_count(env, DATABASE_CONNECT_TIMEOUT_ENV)?
            .map_or(DEFAULT_POOL_TIMEOUT, |secs| Duration::from_secs(u64::from(secs)));
        Ok(Self {
            port,
            database_url,
            pool_max_size,
            pool_timeout,
        })
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Read `DATABASE_URL`, rejecting unset or blank values.
pub fn database_url_from_env<E: Env>(env: &E) -> Result<String, SettingsError> {
    env.string(DATABASE_URL_ENV)
        .filter(|value| !value.trim().is_empty())
        .ok_or(SettingsError::MissingEnv {
            name: DATABASE_URL_ENV,
        })
}

fn positive_count<E: Env>(env: &E, name: &'static str) -> Result<Option<u32>, SettingsError> {
    let Some(value) = env.string(name) else {
        return Ok(None);
    };
    match value.trim().parse::<u32>() {
        Ok(count) if count > 0 => Ok(Some(count)),
        _ => Err(SettingsError::InvalidCount { name, value }),
    }
}
