//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `DonationsCommand`, `DonationsQuery`) are
//! called by inbound adapters. Driven ports (the repositories) are
//! implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod donation_repository;
mod donations_command;
mod donations_query;
mod donor_repository;
mod login_service;
mod user_repository;

pub use donation_repository::{DonationRepository, DonationRepositoryError};
pub use donations_command::{
    DonationRejection, DonationsCommand, RecordDonationOutcome, RecordDonationRequest,
};
pub use donations_query::DonationsQuery;
pub use donor_repository::{DonorRepository, DonorRepositoryError};
pub use login_service::LoginService;
pub use user_repository::{UserPersistenceError, UserRepository};
