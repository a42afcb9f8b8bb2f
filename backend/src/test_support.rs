//! Test utilities for the donations crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and behind the `test-support` feature.

pub mod env {
    //! Environment doubles built on `mockable::MockEnv`.

    use std::collections::HashMap;

    use mockable::MockEnv;

    /// Build an environment that only knows about `vars`.
    ///
    /// # Examples
    /// ```
    /// use donations::test_support::env::mock_env;
    /// use mockable::Env;
    ///
    /// let env = mock_env(&[("PORT", "8080")]);
    /// assert_eq!(env.string("PORT").as_deref(), Some("8080"));
    /// assert_eq!(env.string("DATABASE_URL"), None);
    /// ```
    pub fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }
}

pub mod memory {
    //! In-memory implementations of the repository ports.
    //!
    //! [`InMemoryStore`] keeps donors, donations and users behind a single
    //! mutex and enforces the same uniqueness and foreign-key rules as the
    //! PostgreSQL schema.

    use std::sync::{Mutex, MutexGuard, PoisonError};

    use async_trait::async_trait;

    use crate::domain::ports::{
        DonationRepository, DonationRepositoryError, DonorRepository, DonorRepositoryError,
        UserPersistenceError, UserRepository,
    };
    use crate::domain::{
        Donation, DonationAmount, DonationId, DonationRecord, Donor, DonorId, DonorName,
        NewUser, PasswordDigest, User, UserId, Username,
    };

    #[derive(Default)]
    struct Tables {
        donors: Vec<Donor>,
        donations: Vec<Donation>,
        users: Vec<User>,
    }

    fn next_id(len: usize) -> i32 {
        i32::try_from(len).map_or(i32::MAX, |n| n.saturating_add(1))
    }

    /// Shared in-memory store implementing every repository port.
    #[derive(Default)]
    pub struct InMemoryStore {
        tables: Mutex<Tables>,
    }

    impl InMemoryStore {
        /// Create an empty store.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn tables(&self) -> MutexGuard<'_, Tables> {
            self.tables.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Add a user whose password is hashed with `rounds` iterations.
        ///
        /// # Panics
        /// Panics when `name` is empty or hashing fails.
        #[expect(clippy::expect_used, reason = "test fixture helper")]
        pub fn add_user(&self, name: &str, password: &str, rounds: u32) -> User {
            let mut tables = self.tables();
            let user = User::new(
                UserId::new(next_id(tables.users.len())),
                Username::new(name).expect("non-empty username"),
                PasswordDigest::hash_with_rounds(password, rounds).expect("hash password"),
            );
            tables.users.push(user.clone());
            user
        }

        /// Names of every stored donor, in insertion order.
        #[must_use]
        pub fn donor_names(&self) -> Vec<String> {
            self.tables()
                .donors
                .iter()
                .map(|donor| donor.name().to_string())
                .collect()
        }

        /// Every stored donation, in insertion order.
        #[must_use]
        pub fn donations(&self) -> Vec<Donation> {
            self.tables().donations.clone()
        }

        fn records<'a>(
            tables: &Tables,
            donations: impl Iterator<Item = &'a Donation>,
        ) -> Vec<DonationRecord> {
            donations
                .filter_map(|donation| {
                    tables
                        .donors
                        .iter()
                        .find(|donor| donor.id() == donation.donor_id())
                        .map(|donor| {
                            DonationRecord::new(donation.id(), donor.clone(), donation.amount())
                        })
                })
                .collect()
        }
    }

    #[async_trait]
    impl DonorRepository for InMemoryStore {
        async fn find_by_name(&self, name: &str) -> Result<Option<Donor>, DonorRepositoryError> {
            Ok(self
                .tables()
                .donors
                .iter()
                .find(|donor| donor.name().as_ref() == name)
                .cloned())
        }

        async fn upsert_by_name(&self, name: &DonorName) -> Result<Donor, DonorRepositoryError> {
            let mut tables = self.tables();
            if let Some(existing) = tables.donors.iter().find(|donor| donor.name() == name) {
                return Ok(existing.clone());
            }
            let donor = Donor::new(
                DonorId::new(next_id(tables.donors.len())),
                DonorName::from_stored(name.to_string()),
            );
            tables.donors.push(donor.clone());
            Ok(donor)
        }
    }

    #[async_trait]
    impl DonationRepository for InMemoryStore {
        async fn insert(
            &self,
            donor_id: DonorId,
            amount: DonationAmount,
        ) -> Result<Donation, DonationRepositoryError> {
            let mut tables = self.tables();
            if !tables.donors.iter().any(|donor| donor.id() == donor_id) {
                return Err(DonationRepositoryError::unknown_donor(donor_id.get()));
            }
            let donation = Donation::new(
                DonationId::new(next_id(tables.donations.len())),
                donor_id,
                amount,
            );
            tables.donations.push(donation.clone());
            Ok(donation)
        }

        async fn list_all(&self) -> Result<Vec<DonationRecord>, DonationRepositoryError> {
            let tables = self.tables();
            Ok(Self::records(&tables, tables.donations.iter()))
        }

        async fn list_for_donor(
            &self,
            donor_id: DonorId,
        ) -> Result<Vec<DonationRecord>, DonationRepositoryError> {
            let tables = self.tables();
            Ok(Self::records(
                &tables,
                tables
                    .donations
                    .iter()
                    .filter(|donation| donation.donor_id() == donor_id),
            ))
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryStore {
        async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserPersistenceError> {
            Ok(self
                .tables()
                .users
                .iter()
                .find(|user| user.name().as_ref() == name)
                .cloned())
        }

        async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
            let mut tables = self.tables();
            if tables.users.iter().any(|u| u.name() == &user.name) {
                return Err(UserPersistenceError::duplicate_name(user.name.to_string()));
            }
            let stored = User::new(
                UserId::new(next_id(tables.users.len())),
                user.name.clone(),
                user.password.clone(),
            );
            tables.users.push(stored.clone());
            Ok(stored)
        }
    }

}

pub mod http {
    //! Helpers for driving the HTTP adapter against [`InMemoryStore`].
    //!
    //! [`InMemoryStore`]: super::memory::InMemoryStore

    use std::sync::Arc;

    use actix_web::cookie::{Cookie, Key};
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::http::header;
    use actix_web::{App, test, web};

    use super::memory::InMemoryStore;
    use crate::domain::{DonationService, UserLoginService};
    use crate::inbound::http::health::HealthState;
    use actix_session::SessionMiddleware;
    use actix_session::storage::CookieSessionStore;

    use crate::inbound::http::session_config::{
        SESSION_COOKIE_NAME, SessionSettings, session_middleware,
    };
    use crate::inbound::http::state::{HttpState, HttpStatePorts};
    use crate::inbound::http::templates::Templates;
    use crate::server::{AppDependencies, build_app};

    /// PBKDF2 rounds used for fixture users.
    pub const TEST_ROUNDS: u32 = 1_000;
    /// Name of the fixture user created by [`seed_user`].
    pub const TEST_USER: &str = "alice";
    /// Password of the fixture user created by [`seed_user`].
    pub const TEST_PASSWORD: &str = "correct horse";

    /// Session settings with a fresh key and the `Secure` flag off.
    #[must_use]
    pub fn test_session_settings() -> SessionSettings {
        SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
        }
    }

    /// Cookie session middleware over [`test_session_settings`].
    #[must_use]
    pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
        session_middleware(&test_session_settings())
    }

    /// Build handler state whose ports all read and write `store`.
    ///
    /// # Panics
    /// Panics if the embedded templates fail to compile.
    #[expect(clippy::expect_used, reason = "test fixture helper")]
    pub fn http_state(store: &Arc<InMemoryStore>) -> HttpState {
        let service = Arc::new(DonationService::new(store.clone(), store.clone()));
        let ports = HttpStatePorts {
            login: Arc::new(UserLoginService::with_decoy_rounds(
                store.clone(),
                TEST_ROUNDS,
            )),
            donations: service.clone(),
            donations_query: service,
        };
        let templates = Templates::new().expect("embedded templates compile");
        HttpState::new(ports, Arc::new(templates))
    }

    /// The production application wired to `store`, marked ready.
    pub fn test_app(
        store: &Arc<InMemoryStore>,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        build_app(AppDependencies {
            health_state,
            http_state: web::Data::new(http_state(store)),
            session: test_session_settings(),
        })
    }

    /// Add the fixture user to `store`.
    pub fn seed_user(store: &InMemoryStore) {
        store.add_user(TEST_USER, TEST_PASSWORD, TEST_ROUNDS);
    }

    /// A login submission for the fixture user.
    #[must_use]
    pub fn login_request() -> test::TestRequest {
        test::TestRequest::post()
            .uri("/login/")
            .set_form([("name", TEST_USER), ("password", TEST_PASSWORD)])
    }

    /// The session cookie set on `res`, if any.
    #[must_use]
    pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .map(Cookie::into_owned)
    }

    /// The `Location` header of `res`, if any.
    #[must_use]
    pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }
}
