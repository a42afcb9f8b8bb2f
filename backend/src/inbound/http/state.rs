//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DonationsCommand, DonationsQuery, LoginService};
use crate::inbound::http::templates::Templates;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Credential check for the login page.
    pub login: Arc<dyn LoginService>,
    /// Create flow.
    pub donations: Arc<dyn DonationsCommand>,
    /// Listing and lookup flows.
    pub donations_query: Arc<dyn DonationsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub donations: Arc<dyn DonationsCommand>,
    pub donations_query: Arc<dyn DonationsQuery>,
    /// Compiled page templates.
    pub templates: Arc<Templates>,
}

impl HttpState {
    /// Construct state from a ports bundle and compiled templates.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use donations::domain::{DonationService, UserLoginService};
    /// use donations::inbound::http::state::{HttpState, HttpStatePorts};
    /// use donations::inbound::http::templates::Templates;
    /// use donations::test_support::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let service = Arc::new(DonationService::new(store.clone(), store.clone()));
    /// let ports = HttpStatePorts {
    ///     login: Arc::new(UserLoginService::new(store)),
    ///     donations: service.clone(),
    ///     donations_query: service,
    /// };
    /// let state = HttpState::new(ports, Arc::new(Templates::new().unwrap()));
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts, templates: Arc<Templates>) -> Self {
        let HttpStatePorts {
            login,
            donations,
            donations_query,
        } = ports;
        Self {
            login,
            donations,
            donations_query,
            templates,
        }
    }
}
