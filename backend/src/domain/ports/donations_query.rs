//! Driving port for reading donations.

use async_trait::async_trait;

use crate::domain::{DonationRecord, DonorDonations, Error};

/// Domain use-case port for the listing and per-donor lookup pages.
#[async_trait]
pub trait DonationsQuery: Send + Sync {
    /// Every donation with its donor name, in storage order.
    async fn list_donations(&self) -> Result<Vec<DonationRecord>, Error>;

    /// Donations of the donor named exactly `name`, or `None` when no such
    /// donor exists.
    async fn donations_for_donor(&self, name: &str) -> Result<Option<DonorDonations>, Error>;
}
