//! Salted password hashes.
//!
//! Hashes are PBKDF2-HMAC-SHA256 PHC strings such as
//! `$pbkdf2-sha256$i=29000,l=32$<salt>$<hash>`. Verification reads the round
//! count from the stored string, so hashes created with other round counts
//! keep working.

use std::fmt;

use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Algorithm, Params, Pbkdf2};

/// Round count applied to newly provisioned passwords.
pub const DEFAULT_ROUNDS: u32 = 29_000;

const OUTPUT_LENGTH: usize = 32;

/// Errors raised while creating or parsing password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordDigestError {
    /// The stored value is not a PHC string.
    #[error("malformed password hash: {message}")]
    Malformed { message: String },
    /// Hash computation failed (for example, no entropy for the salt).
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
}

/// Stored password hash.
///
/// # Examples
/// ```
/// use donations::domain::PasswordDigest;
///
/// let digest = PasswordDigest::hash_with_rounds("hunter2", 1_000).unwrap();
/// assert!(digest.verify("hunter2"));
/// assert!(!digest.verify("hunter3"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a plaintext password with [`DEFAULT_ROUNDS`] and a random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordDigestError> {
        Self::hash_with_rounds(password, DEFAULT_ROUNDS)
    }

    /// Hash a plaintext password with an explicit round count.
    pub fn hash_with_rounds(password: &str, rounds: u32) -> Result<Self, PasswordDigestError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params {
            rounds,
            output_length: OUTPUT_LENGTH,
        };
        let hash = Pbkdf2
            .hash_password_customized(
                password.as_bytes(),
                Some(Algorithm::Pbkdf2Sha256.ident()),
                None,
                params,
                &salt,
            )
            .map_err(|err| PasswordDigestError::Hashing {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Accept a stored PHC string after checking its structure.
    pub fn parse(encoded: impl Into<String>) -> Result<Self, PasswordDigestError> {
        let encoded = encoded.into();
        PasswordHash::new(&encoded).map_err(|err| PasswordDigestError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(encoded))
    }

    /// Check a plaintext password against this hash.
    pub fn verify(&self, password: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Pbkdf2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                tracing::warn!(%error, "stored password hash could not be parsed");
                false
            }
        }
    }

    /// Encoded PHC string for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}
