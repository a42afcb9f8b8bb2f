//! Driving port for recording donations.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Donation, Donor, Error};

/// Raw form input for a new donation.
///
/// Fields are optional because a browser may omit either of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDonationRequest {
    /// Free-text donor name, normalised by the service.
    pub donor_name: Option<String>,
    /// Free-text amount, parsed by the service.
    pub amount: Option<String>,
}

/// Reasons a submitted donation was not recorded.
///
/// The `Display` output is the message shown back on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationRejection {
    /// The donor name field was missing or empty.
    EmptyDonorName,
    /// The amount was missing or not a whole number. The donor had already
    /// been resolved (and possibly created) and stays persisted.
    InvalidAmount {
        /// Donor resolved before the amount was checked.
        donor: Donor,
    },
}

impl fmt::Display for DonationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDonorName => {
                write!(f, "No name was entered, please enter the donor's name.")
            }
            Self::InvalidAmount { .. } => write!(
                f,
                "Donation amount requires a whole number, please try again."
            ),
        }
    }
}

/// Outcome of [`DonationsCommand::record_donation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDonationOutcome {
    /// The donation was persisted.
    Recorded {
        /// Donor the donation was linked to.
        donor: Donor,
        /// Persisted donation.
        donation: Donation,
    },
    /// The input was rejected; the user may correct it and resubmit.
    Rejected(DonationRejection),
}

/// Domain use-case port for the create flow.
#[async_trait]
pub trait DonationsCommand: Send + Sync {
    /// Validate input, resolve the donor and persist the donation.
    ///
    /// Infrastructure failures return `Err`; user-correctable input returns
    /// [`RecordDonationOutcome::Rejected`].
    async fn record_donation(
        &self,
        request: RecordDonationRequest,
    ) -> Result<RecordDonationOutcome, Error>;
}
