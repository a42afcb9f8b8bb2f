//! Create a login user out of band; there is no HTTP registration flow.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, BufRead};

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{DefaultEnv, Env};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use donations::domain::ports::UserRepository;
use donations::domain::{NewUser, PasswordDigest, Username};
use donations::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};

/// `provision-user` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "provision-user",
    about = "Store a user who may sign in and record donations",
    version
)]
struct CliArgs {
    /// Login name, matched exactly at sign-in.
    #[arg(long, value_name = "name")]
    name: String,
    /// Database connection URL.
    #[arg(long = "database-url", value_name = "url", env = "DATABASE_URL")]
    database_url: String,
}

/// Environment variable consulted before prompting on stdin.
const PASSWORD_ENV: &str = "PROVISION_PASSWORD";

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse()?;
    let username = Username::new(args.name.as_str()).wrap_err("invalid --name")?;
    let password = read_password(&DefaultEnv::new())?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(provision(&args.database_url, username, &password))
}

fn read_password(env: &impl Env) -> Result<Zeroizing<String>> {
    if let Some(value) = env.string(PASSWORD_ENV) {
        return non_empty(Zeroizing::new(value));
    }
    let mut line = Zeroizing::new(String::new());
    io::stdin()
        .lock()
        .read_line(&mut line)
        .wrap_err("failed to read password from stdin")?;
    let trimmed = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_owned());
    non_empty(trimmed)
}

fn non_empty(password: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if password.is_empty() {
        return Err(eyre!(
            "password must not be empty; set {PASSWORD_ENV} or pipe it on stdin"
        ));
    }
    Ok(password)
}

async fn provision(database_url: &str, name: Username, password: &str) -> Result<()> {
    run_pending_migrations(database_url).await?;
    let pool = DbPool::new(
        PoolConfig::new(database_url)
            .with_max_size(1)
            .with_min_idle(None),
    )
    .await?;

    let digest = PasswordDigest::hash(password).wrap_err("failed to hash password")?;
    let repository = DieselUserRepository::new(pool);
    let user = repository
        .insert(&NewUser {
            name,
            password: digest,
        })
        .await
        .wrap_err("failed to store user")?;

    info!(user = %user.name(), id = user.id().get(), "user provisioned");
    Ok(())
}
