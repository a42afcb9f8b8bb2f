//! Donation tracking web application.
//!
//! Authenticated users record donations against named donors; anyone can
//! browse the list or filter it by donor. The crate is laid out as ports and
//! adapters: [`domain`] holds the model and use-cases, [`inbound`] the HTTP
//! adapter, and [`outbound`] the Diesel persistence adapters.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
