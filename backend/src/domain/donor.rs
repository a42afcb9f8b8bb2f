//! Donor identity.
//!
//! Donors are keyed by name throughout the application. Names entered on the
//! donation form are normalised by [`DonorName::normalise`] so that "bob",
//! "Bob" and "BOB" resolve to the same record. Whitespace is part of the
//! name: " bob" and "bob" are different donors.

use std::fmt;

/// Surrogate key assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DonorId(i32);

impl DonorId {
    /// Wrap a raw store identifier.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier accepted by persistence adapters.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for DonorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`DonorName::normalise`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonorNameError {
    /// The submitted name was the empty string.
    #[error("donor name must not be empty")]
    Empty,
}

/// Normalised donor name.
///
/// ## Invariants
/// - Whitespace is kept exactly as submitted.
/// - The first character is upper-cased and every other character is
///   lower-cased.
/// - The value is never empty.
///
/// # Examples
/// ```
/// use donations::domain::DonorName;
///
/// let name = DonorName::normalise("mcDONALD").unwrap();
/// assert_eq!(name.as_ref(), "Mcdonald");
/// assert_eq!(DonorName::normalise("  ann ").unwrap().as_ref(), "  ann ");
/// assert!(DonorName::normalise("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DonorName(String);

impl DonorName {
    /// Normalise free-text input into a donor name.
    pub fn normalise(raw: &str) -> Result<Self, DonorNameError> {
        let capitalised = capitalise(raw);
        if capitalised.is_empty() {
            return Err(DonorNameError::Empty);
        }
        Ok(Self(capitalised))
    }

    /// Rehydrate a name already normalised by the store.
    pub(crate) fn from_stored(name: String) -> Self {
        Self(name)
    }
}

fn capitalise(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl AsRef<str> for DonorName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DonorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donor {
    id: DonorId,
    name: DonorName,
}

impl Donor {
    /// Assemble a donor from its persisted parts.
    pub fn new(id: DonorId, name: DonorName) -> Self {
        Self { id, name }
    }

    /// Surrogate store identifier.
    pub fn id(&self) -> DonorId {
        self.id
    }

    /// Unique donor name.
    pub fn name(&self) -> &DonorName {
        &self.name
    }
}
