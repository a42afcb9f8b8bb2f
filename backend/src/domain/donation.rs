//! Donation records and amount parsing.

use std::fmt;

use crate::domain::{Donor, DonorId};

/// Surrogate key assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DonationId(i32);

impl DonationId {
    /// Wrap a raw store identifier.
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier accepted by persistence adapters.
    pub fn get(self) -> i32 {
        self.0
    }
}

/// Errors returned by [`DonationAmount::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonationAmountError {
    /// No amount was submitted.
    #[error("donation amount is missing")]
    Missing,
    /// The submitted text is not a whole number in range.
    #[error("donation amount '{value}' is not a whole number")]
    NotWholeNumber { value: String },
}

/// Whole-number donation value. The sign is not constrained.
///
/// # Examples
/// ```
/// use donations::domain::DonationAmount;
///
/// assert_eq!(DonationAmount::parse(Some(" 50 ")).unwrap().get(), 50);
/// assert_eq!(DonationAmount::parse(Some("-5")).unwrap().get(), -5);
/// assert!(DonationAmount::parse(Some("abc")).is_err());
/// assert!(DonationAmount::parse(None).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DonationAmount(i64);

impl DonationAmount {
    /// Wrap an already-parsed value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Parse submitted form text, ignoring surrounding whitespace.
    pub fn parse(raw: Option<&str>) -> Result<Self, DonationAmountError> {
        let raw = raw.ok_or(DonationAmountError::Missing)?;
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DonationAmountError::NotWholeNumber {
                value: raw.to_owned(),
            })
    }

    /// Numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DonationAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted donation as written by the create flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    id: DonationId,
    donor_id: DonorId,
    amount: DonationAmount,
}

impl Donation {
    /// Assemble a donation from its persisted parts.
    pub fn new(id: DonationId, donor_id: DonorId, amount: DonationAmount) -> Self {
        Self {
            id,
            donor_id,
            amount,
        }
    }

    /// Surrogate store identifier.
    pub fn id(&self) -> DonationId {
        self.id
    }

    /// Donor the donation belongs to.
    pub fn donor_id(&self) -> DonorId {
        self.donor_id
    }

    /// Donated value.
    pub fn amount(&self) -> DonationAmount {
        self.amount
    }
}

/// A donation joined with its donor, as shown on listing pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRecord {
    id: DonationId,
    donor: Donor,
    amount: DonationAmount,
}

impl DonationRecord {
    /// Join a donation id and amount with the owning donor.
    pub fn new(id: DonationId, donor: Donor, amount: DonationAmount) -> Self {
        Self { id, donor, amount }
    }

    /// Surrogate store identifier of the donation.
    pub fn id(&self) -> DonationId {
        self.id
    }

    /// Owning donor.
    pub fn donor(&self) -> &Donor {
        &self.donor
    }

    /// Donated value.
    pub fn amount(&self) -> DonationAmount {
        self.amount
    }
}

/// Every donation recorded against one donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorDonations {
    /// Donor matched by the lookup.
    pub donor: Donor,
    /// Donations in storage order; may be empty.
    pub donations: Vec<DonationRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("50", 50)]
    #[case("  50\n", 50)]
    #[case("+7", 7)]
    #[case("-20", -20)]
    #[case("0", 0)]
    #[case("9223372036854775807", i64::MAX)]
    fn parse_accepts_whole_numbers(#[case] raw: &str, #[case] expected: i64) {
        let amount = DonationAmount::parse(Some(raw)).expect("whole number");
        assert_eq!(amount.get(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("12.5")]
    #[case("1e3")]
    #[case("9223372036854775808")]
    fn parse_rejects_non_integers(#[case] raw: &str) {
        let err = DonationAmount::parse(Some(raw)).expect_err("not a whole number");
        assert!(matches!(err, DonationAmountError::NotWholeNumber { .. }));
    }

    #[rstest]
    fn parse_rejects_missing_field() {
        assert_eq!(
            DonationAmount::parse(None),
            Err(DonationAmountError::Missing)
        );
    }
}
