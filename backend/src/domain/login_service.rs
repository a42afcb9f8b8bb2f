//! Password login backed by the user repository.
//!
//! Unknown usernames are still run through a full hash verification against
//! a decoy digest so that response timing does not reveal which names exist.
//! Every PBKDF2 verification runs on Tokio's blocking pool so it never stalls
//! the async workers serving other requests.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, UserPersistenceError, UserRepository};
use crate::domain::{DEFAULT_ROUNDS, Error, LoginCredentials, PasswordDigest, Username};

const INVALID_CREDENTIALS: &str = "invalid credentials";

type DecoyCell = Arc<OnceLock<Option<PasswordDigest>>>;

/// Login service verifying credentials against stored password hashes.
pub struct UserLoginService<U> {
    users: Arc<U>,
    decoy_rounds: u32,
    decoy: DecoyCell,
}

impl<U> UserLoginService<U> {
    /// Create a service whose decoy hash uses [`DEFAULT_ROUNDS`].
    pub fn new(users: Arc<U>) -> Self {
        Self::with_decoy_rounds(users, DEFAULT_ROUNDS)
    }

    /// Create a service with an explicit decoy round count.
    ///
    /// The decoy should cost the same as real hashes; tests use a lower count
    /// to stay fast.
    pub fn with_decoy_rounds(users: Arc<U>, decoy_rounds: u32) -> Self {
        Self {
            users,
            decoy_rounds,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    async fn burn_decoy(&self, password: &str) -> Result<(), Error> {
        let decoy = Arc::clone(&self.decoy);
        let rounds = self.decoy_rounds;
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || {
            let digest = decoy.get_or_init(|| {
                PasswordDigest::hash_with_rounds("decoy password", rounds)
                    .inspect_err(|error| tracing::warn!(%error, "decoy hash unavailable"))
                    .ok()
            });
            // Only the work matters.
            digest.as_ref().is_some_and(|digest| digest.verify(&password))
        })
        .await
        .map(drop)
        .map_err(verification_task_failed)
    }
}

async fn verify_password(digest: PasswordDigest, password: &str) -> Result<bool, Error> {
    let password = Zeroizing::new(password.to_owned());
    tokio::task::spawn_blocking(move || digest.verify(&password))
        .await
        .map_err(verification_task_failed)
}

fn verification_task_failed(error: tokio::task::JoinError) -> Error {
    Error::internal(format!("password verification task failed: {error}"))
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateName { name } => {
            Error::internal(format!("unexpected duplicate user '{name}'"))
        }
    }
}

#[async_trait]
impl<U> LoginService for UserLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error> {
        let user = self
            .users
            .find_by_name(credentials.username())
            .await
            .map_err(map_user_error)?;

        let Some(user) = user else {
            self.burn_decoy(credentials.password()).await?;
            info!(username = %credentials.username(), "login rejected: unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if verify_password(user.password().clone(), credentials.password()).await? {
            Ok(user.name().clone())
        } else {
            info!(username = %credentials.username(), "login rejected: wrong password");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}
