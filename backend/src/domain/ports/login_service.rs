//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to authenticate credentials without
//! knowing the backing infrastructure, so handler tests can substitute a
//! test double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Username};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated username.
    ///
    /// Unknown users and wrong passwords both yield
    /// [`crate::domain::ErrorCode::Unauthorized`] with the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error>;
}
