//! Port abstraction for donor persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Donor, DonorName};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by donor repository adapters.
    pub enum DonorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "donor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "donor repository query failed: {message}",
    }
}

/// Driven port for the donor table.
#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Fetch a donor whose name matches `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Donor>, DonorRepositoryError>;

    /// Return the donor with this name, inserting it first when absent.
    ///
    /// Implementations must be atomic with respect to concurrent callers
    /// upserting the same name: both receive the same donor.
    async fn upsert_by_name(&self, name: &DonorName) -> Result<Donor, DonorRepositoryError>;
}
