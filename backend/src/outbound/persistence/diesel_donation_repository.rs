//! PostgreSQL-backed `DonationRepository` implementation using Diesel ORM.
//!
//! Listings join each donation with its donor and are ordered by donation id,
//! which matches insertion order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DonationRepository, DonationRepositoryError};
use crate::domain::{Donation, DonationAmount, DonationRecord, DonorId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{DonationRow, DonorRow, NewDonationRow, donation_record};
use super::pool::{DbPool, PoolError};
use super::schema::{donations, donors};

/// Diesel-backed implementation of the `DonationRepository` port.
#[derive(Clone)]
pub struct DieselDonationRepository {
    pool: DbPool,
}

impl DieselDonationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DonationRepositoryError {
    DonationRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(
    error: diesel::result::Error,
    donor_id: Option<DonorId>,
) -> DonationRepositoryError {
    match (classify_diesel_error(&error), donor_id) {
        (DieselFailure::Connection(message), _) => DonationRepositoryError::connection(message),
        (DieselFailure::ForeignKeyViolation, Some(donor_id)) => {
            DonationRepositoryError::unknown_donor(donor_id.get())
        }
        (DieselFailure::ForeignKeyViolation | DieselFailure::UniqueViolation, _) => {
            DonationRepositoryError::query("constraint violation")
        }
        (DieselFailure::Query(message), _) => DonationRepositoryError::query(message),
    }
}

#[async_trait]
impl DonationRepository for DieselDonationRepository {
    async fn insert(
        &self,
        donor_id: DonorId,
        amount: DonationAmount,
    ) -> Result<Donation, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: DonationRow = diesel::insert_into(donations::table)
            .values(NewDonationRow {
                donor_id: donor_id.get(),
                value: amount.get(),
            })
            .returning(DonationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(donor_id)))?;

        Ok(Donation::from(row))
    }

    async fn list_all(&self) -> Result<Vec<DonationRecord>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(DonationRow, DonorRow)> = donations::table
            .inner_join(donors::table)
            .order(donations::id.asc())
            .select((DonationRow::as_select(), DonorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(rows.into_iter().map(donation_record).collect())
    }

    async fn list_for_donor(
        &self,
        donor_id: DonorId,
    ) -> Result<Vec<DonationRecord>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(DonationRow, DonorRow)> = donations::table
            .inner_join(donors::table)
            .filter(donations::donor_id.eq(donor_id.get()))
            .order(donations::id.asc())
            .select((DonationRow::as_select(), DonorRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        Ok(rows.into_iter().map(donation_record).collect())
    }
}
