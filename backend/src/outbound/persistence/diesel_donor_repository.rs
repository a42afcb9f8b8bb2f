//! PostgreSQL-backed `DonorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DonorRepository, DonorRepositoryError};
use crate::domain::{Donor, DonorName};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{DonorRow, NewDonorRow};
use super::pool::{DbPool, PoolError};
use super::schema::donors;

/// Diesel-backed implementation of the `DonorRepository` port.
#[derive(Clone)]
pub struct DieselDonorRepository {
    pool: DbPool,
}

impl DieselDonorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DonorRepositoryError {
    DonorRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> DonorRepositoryError {
    match classify_diesel_error(&error) {
        DieselFailure::Connection(message) => DonorRepositoryError::connection(message),
        DieselFailure::UniqueViolation | DieselFailure::ForeignKeyViolation => {
            DonorRepositoryError::query("constraint violation")
        }
        DieselFailure::Query(message) => DonorRepositoryError::query(message),
    }
}

#[async_trait]
impl DonorRepository for DieselDonorRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Donor>, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DonorRow> = donors::table
            .filter(donors::name.eq(name))
            .select(DonorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Donor::from))
    }

    async fn upsert_by_name(&self, name: &DonorName) -> Result<Donor, DonorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // A concurrent insert of the same name is absorbed by the conflict
        // clause; the read below then sees whichever row won.
        diesel::insert_into(donors::table)
            .values(NewDonorRow {
                name: name.as_ref(),
            })
            .on_conflict(donors::name)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let row: DonorRow = donors::table
            .filter(donors::name.eq(name.as_ref()))
            .select(DonorRow::as_select())
            .first(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Donor::from(row))
    }
}
