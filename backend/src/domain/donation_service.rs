//! Donation domain service.
//!
//! Implements the create flow and both read flows on top of the donor and
//! donation repositories. Validation order matters: the donor is resolved
//! (and created when new) before the amount is parsed, so a rejected amount
//! can leave a donor with no donations behind.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    DonationRejection, DonationRepository, DonationRepositoryError, DonationsCommand,
    DonationsQuery, DonorRepository, DonorRepositoryError, RecordDonationOutcome,
    RecordDonationRequest,
};
use crate::domain::{DonationAmount, DonationRecord, DonorDonations, DonorName, Error};

/// Donation service implementing the driving ports.
#[derive(Clone)]
pub struct DonationService<D, N> {
    donors: Arc<D>,
    donations: Arc<N>,
}

impl<D, N> DonationService<D, N> {
    /// Create a new service with the given repositories.
    pub fn new(donors: Arc<D>, donations: Arc<N>) -> Self {
        Self { donors, donations }
    }
}

fn map_donor_error(error: DonorRepositoryError) -> Error {
    match error {
        DonorRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("donor repository unavailable: {message}"))
        }
        DonorRepositoryError::Query { message } => {
            Error::internal(format!("donor repository error: {message}"))
        }
    }
}

fn map_donation_error(error: DonationRepositoryError) -> Error {
    match error {
        DonationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("donation repository unavailable: {message}"))
        }
        DonationRepositoryError::Query { message } => {
            Error::internal(format!("donation repository error: {message}"))
        }
        DonationRepositoryError::UnknownDonor { donor_id } => {
            Error::internal(format!("donation references missing donor {donor_id}"))
        }
    }
}

#[async_trait]
impl<D, N> DonationsCommand for DonationService<D, N>
where
    D: DonorRepository,
    N: DonationRepository,
{
    async fn record_donation(
        &self,
        request: RecordDonationRequest,
    ) -> Result<RecordDonationOutcome, Error> {
        let RecordDonationRequest { donor_name, amount } = request;

        let Ok(name) = DonorName::normalise(donor_name.as_deref().unwrap_or_default()) else {
            return Ok(RecordDonationOutcome::Rejected(
                DonationRejection::EmptyDonorName,
            ));
        };

        let donor = self
            .donors
            .upsert_by_name(&name)
            .await
            .map_err(map_donor_error)?;

        let amount = match DonationAmount::parse(amount.as_deref()) {
            Ok(amount) => amount,
            Err(error) => {
                debug!(%error, donor = %donor.name(), "donation amount rejected");
                return Ok(RecordDonationOutcome::Rejected(
                    DonationRejection::InvalidAmount { donor },
                ));
            }
        };

        let donation = self
            .donations
            .insert(donor.id(), amount)
            .await
            .map_err(map_donation_error)?;
        info!(
            donor = %donor.name(),
            amount = %donation.amount(),
            "donation recorded"
        );
        Ok(RecordDonationOutcome::Recorded { donor, donation })
    }
}

#[async_trait]
impl<D, N> DonationsQuery for DonationService<D, N>
where
    D: DonorRepository,
    N: DonationRepository,
{
    async fn list_donations(&self) -> Result<Vec<DonationRecord>, Error> {
        self.donations.list_all().await.map_err(map_donation_error)
    }

    async fn donations_for_donor(&self, name: &str) -> Result<Option<DonorDonations>, Error> {
        let Some(donor) = self
            .donors
            .find_by_name(name)
            .await
            .map_err(map_donor_error)?
        else {
            return Ok(None);
        };

        let donations = self
            .donations
            .list_for_donor(donor.id())
            .await
            .map_err(map_donation_error)?;
        Ok(Some(DonorDonations { donor, donations }))
    }
}
