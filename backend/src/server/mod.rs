//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
use crate::domain::{DonationService, UserLoginService};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::session_config::{SessionSettings, session_middleware};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::templates::Templates;
use crate::inbound::http::{donations, login, lookup};
use crate::outbound::persistence::{
    DbPool, DieselDonationRepository, DieselDonorRepository, DieselUserRepository,
};

/// Register every page and probe route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(donations::home)
        .service(donations::list_donations)
        .service(donations::create_form)
        .service(donations::create_donation)
        .service(login::login_form)
        .service(login::login)
        .service(lookup::lookup_form)
        .service(lookup::lookup_donor)
        .service(ready)
        .service(live);
}

/// Shared values cloned into every worker's application.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub session: SessionSettings,
}

/// Build the application for one worker.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session_middleware(&session))
        .wrap(Trace)
        .configure(configure)
}

/// Wire the Diesel repositories into the domain services behind the ports.
///
/// # Errors
/// Returns [`std::io::Error`] if the embedded templates fail to compile.
pub fn build_http_state(pool: &DbPool) -> std::io::Result<HttpState> {
    let donors = Arc::new(DieselDonorRepository::new(pool.clone()));
    let donation_rows = Arc::new(DieselDonationRepository::new(pool.clone()));
    let users = Arc::new(DieselUserRepository::new(pool.clone()));

    let donation_service = Arc::new(DonationService::new(donors, donation_rows));
    let ports = HttpStatePorts {
        login: Arc::new(UserLoginService::new(users)),
        donations: donation_service.clone(),
        donations_query: donation_service,
    };
    let templates = Templates::new()
        .map_err(|err| std::io::Error::other(format!("template compilation failed: {err}")))?;
    Ok(HttpState::new(ports, Arc::new(templates)))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when building state or binding the socket
/// fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        db_pool,
    } = config;
    let http_state = web::Data::new(build_http_state(&db_pool)?);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        session,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
