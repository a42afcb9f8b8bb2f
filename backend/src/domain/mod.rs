//! Domain primitives, aggregates and services.
//!
//! Purpose: define the donor, donation and user types used by the HTTP and
//! persistence layers, and the services that implement the driving ports.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure reported by services.
//! - `Donor`, `Donation`, `DonationRecord`: the donation ledger.
//! - `User`, `PasswordDigest`, `LoginCredentials`: authentication.
//! - `DonationService`, `UserLoginService`: port implementations.

pub mod auth;
pub mod donation;
pub mod donation_service;
pub mod donor;
pub mod error;
pub mod login_service;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::donation::{
    Donation, DonationAmount, DonationAmountError, DonationId, DonationRecord, DonorDonations,
};
pub use self::donation_service::DonationService;
pub use self::donor::{Donor, DonorId, DonorName, DonorNameError};
pub use self::error::{Error, ErrorCode};
pub use self::login_service::UserLoginService;
pub use self::password::{DEFAULT_ROUNDS, PasswordDigest, PasswordDigestError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User, UserId, Username, UsernameError};
