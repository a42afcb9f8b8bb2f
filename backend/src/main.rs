//! Backend entry-point: reads settings, migrates the schema and serves pages.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use donations::inbound::http::health::HealthState;
use donations::inbound::http::session_config::{
    fingerprint::key_fingerprint, session_settings_from_env,
};
use donations::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use donations::server::{ServerConfig, create_server};
use donations::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env).map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );
    let settings = AppSettings::from_env(&env).map_err(std::io::Error::other)?;

    run_pending_migrations(&settings.database_url)
        .await
        .map_err(std::io::Error::other)?;
    let db_pool = DbPool::new(PoolConfig::from_settings(&settings))
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session, settings.bind_addr(), db_pool);
    info!(addr = %config.bind_addr(), "starting server");
    create_server(health_state, config)?.await
}
