//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or retrieving the signed-in
//! username.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Username};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for a newly authenticated user.
    ///
    /// Renewal drops any state carried over from before login and rotates
    /// the cookie.
    pub fn begin_authenticated(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0.clear();
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the signed-in username, if present.
    pub fn username(&self) -> Result<Option<Username>, Error> {
        let name = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match name {
            Some(raw) => match Username::new(raw) {
                Ok(name) => Ok(Some(name)),
                Err(error) => {
                    tracing::warn!("invalid username in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::http::test_session_middleware;
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    fn session_cookie(
        res: &actix_web::dev::ServiceResponse,
    ) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn round_trips_username() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let name = Username::new("alice").expect("fixture name");
                        session.begin_authenticated(&name)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let name = session.username()?.map(|n| n.to_string());
                        Ok::<_, Error>(HttpResponse::Ok().body(name.unwrap_or_default()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body = test::read_body(get_res).await;
        assert_eq!(body, "alice");
    }

    #[actix_web::test]
    async fn fresh_session_has_no_username() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/get",
            web::get().to(|session: SessionContext| async move {
                let present = session.username()?.is_some();
                Ok::<_, Error>(HttpResponse::Ok().body(present.to_string()))
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(test::read_body(res).await, "false");
    }

    #[actix_web::test]
    async fn login_discards_pre_existing_keys() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/plant",
                    web::get().to(|session: Session| async move {
                        session.insert("planted", "x").expect("insert");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        let name = Username::new("alice").expect("fixture name");
                        session.begin_authenticated(&name)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/planted",
                    web::get().to(|session: Session| async move {
                        let planted = session
                            .get::<String>("planted")
                            .expect("read")
                            .is_some();
                        HttpResponse::Ok().body(planted.to_string())
                    }),
                ),
        )
        .await;

        let plant =
            test::call_service(&app, test::TestRequest::get().uri("/plant").to_request()).await;
        let login = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/login")
                .cookie(session_cookie(&plant))
                .to_request(),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/planted")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "false");
    }
}
