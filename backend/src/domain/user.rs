//! Users allowed to record donations.
//!
//! Users are provisioned out of band (see the `provision-user` binary) and are
//! only read by the login flow.

use std::fmt;

use crate::domain::PasswordDigest;

/// Surrogate key assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw store identifier.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier accepted by persistence adapters.
    pub fn get(self) -> i32 {
        self.0
    }
}

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    /// The username is empty.
    #[error("username must not be empty")]
    Empty,
}

/// Unique login name, also carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a username. The value is kept verbatim.
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: Username,
    password: PasswordDigest,
}

impl User {
    /// Assemble a user from its persisted parts.
    pub fn new(id: UserId, name: Username, password: PasswordDigest) -> Self {
        Self { id, name, password }
    }

    /// Surrogate store identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn name(&self) -> &Username {
        &self.name
    }

    /// Stored password hash.
    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }
}

/// A user waiting to be inserted by the provisioning tool.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub name: Username,
    /// Hash of the initial password.
    pub password: PasswordDigest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn username_rejects_empty_input() {
        assert_eq!(Username::new(""), Err(UsernameError::Empty));
    }

    #[rstest]
    #[case("alice")]
    #[case(" alice")]
    #[case("ALICE")]
    fn username_keeps_value_verbatim(#[case] raw: &str) {
        let name = Username::new(raw).expect("non-empty username");
        assert_eq!(name.as_ref(), raw);
    }
}
