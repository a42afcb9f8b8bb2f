//! Login page.
//!
//! ```text
//! GET  /login/  -> login form
//! POST /login/  name=<username>&password=<password>
//! ```
//!
//! Success starts an authenticated session and redirects to `/create/`.
//! Every failure, including missing fields, re-renders the form with the same
//! message.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{ErrorCode, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{html, redirect};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message shown for any failed login attempt.
pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect username or password.";

/// Form body for `POST /login/`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    /// Username, matched exactly.
    pub name: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Render the login form.
#[get("/login/")]
pub async fn login_form(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(html(state.templates.login_form(None)?))
}

/// Authenticate and establish a session.
#[post("/login/")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: Option<web::Form<LoginForm>>,
) -> ApiResult<HttpResponse> {
    let form = form.map(web::Form::into_inner).unwrap_or_default();
    let credentials = match LoginCredentials::try_from_parts(
        form.name.as_deref().unwrap_or_default(),
        form.password.as_deref().unwrap_or_default(),
    ) {
        Ok(credentials) => credentials,
        Err(error) => {
            debug!(%error, "login form incomplete");
            return Ok(html(state.templates.login_form(Some(LOGIN_FAILED_MESSAGE))?));
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(username) => {
            session.begin_authenticated(&username)?;
            Ok(redirect("/create/"))
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            Ok(html(state.templates.login_form(Some(LOGIN_FAILED_MESSAGE))?))
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::http::{
        TEST_PASSWORD, TEST_USER, location, seed_user, session_cookie, test_app,
    };
    use crate::test_support::memory::InMemoryStore;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        seed_user(&store);
        store
    }

    #[rstest]
    #[actix_web::test]
    async fn form_renders_without_message(store: Arc<InMemoryStore>) {
        let app = test::init_service(test_app(&store)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/login/").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert!(!std::str::from_utf8(&body).expect("utf8").contains(LOGIN_FAILED_MESSAGE));
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_credentials_redirect_to_create(store: Arc<InMemoryStore>) {
        let app = test::init_service(test_app(&store)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login/")
                .set_form([("name", TEST_USER), ("password", TEST_PASSWORD)])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res).as_deref(), Some("/create/"));
        assert!(session_cookie(&res).is_some());
    }

    #[rstest]
    #[case(&[("name", TEST_USER), ("password", "wrong")])]
    #[case(&[("name", "nobody"), ("password", TEST_PASSWORD)])]
    #[case(&[("name", TEST_USER)])]
    #[case(&[("password", TEST_PASSWORD)])]
    #[case(&[])]
    #[actix_web::test]
    async fn failures_rerender_with_one_message(
        store: Arc<InMemoryStore>,
        #[case] fields: &[(&str, &str)],
    ) {
        let app = test::init_service(test_app(&store)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/login/")
                .set_form(fields)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_none());
        let body = test::read_body(res).await;
        assert!(std::str::from_utf8(&body).expect("utf8").contains(LOGIN_FAILED_MESSAGE));
    }
}
