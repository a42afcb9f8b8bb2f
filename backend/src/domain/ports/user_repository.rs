//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the same name already exists.
        DuplicateName { name: String } => "user '{name}' already exists",
    }
}

/// Driven port for the user table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user whose name matches `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user. Existing names are rejected, never overwritten.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;
}
