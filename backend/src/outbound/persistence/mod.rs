//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures map to the port
//!   error of each repository.
//!
//! # Example
//!
//! ```no_run
//! use donations::outbound::persistence::{DbPool, DieselDonorRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), donations::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/donations")).await?;
//! let donors = DieselDonorRepository::new(pool);
//! # let _ = donors;
//! # Ok(())
//! # }
//! ```

mod diesel_donation_repository;
mod diesel_donor_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_donation_repository::DieselDonationRepository;
pub use diesel_donor_repository::DieselDonorRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
