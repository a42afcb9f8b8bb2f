//! Port abstraction for donation persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Donation, DonationAmount, DonationRecord, DonorId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by donation repository adapters.
    pub enum DonationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "donation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "donation repository query failed: {message}",
        /// The referenced donor does not exist.
        UnknownDonor { donor_id: i32 } => "donor {donor_id} does not exist",
    }
}

/// Driven port for the donation table.
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Persist a donation for an existing donor.
    async fn insert(
        &self,
        donor_id: DonorId,
        amount: DonationAmount,
    ) -> Result<Donation, DonationRepositoryError>;

    /// Every donation joined with its donor, in storage order.
    async fn list_all(&self) -> Result<Vec<DonationRecord>, DonationRepositoryError>;

    /// Donations referencing `donor_id`, in storage order.
    async fn list_for_donor(
        &self,
        donor_id: DonorId,
    ) -> Result<Vec<DonationRecord>, DonationRepositoryError>;
}
