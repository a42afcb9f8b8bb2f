//! Donation listing and creation pages.
//!
//! ```text
//! GET  /            -> 302 /donations/
//! GET  /donations/  -> every donation with its donor
//! GET  /create/     -> donation form (session required)
//! POST /create/     name=<donor>&amount=<whole number> (session required)
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::ports::{RecordDonationOutcome, RecordDonationRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{html, redirect};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /create/`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateDonationForm {
    /// Donor name as typed.
    pub name: Option<String>,
    /// Donation amount as typed.
    pub amount: Option<String>,
}

impl From<CreateDonationForm> for RecordDonationRequest {
    fn from(form: CreateDonationForm) -> Self {
        Self {
            donor_name: form.name,
            amount: form.amount,
        }
    }
}

/// Send visitors at the root to the listing.
#[get("/")]
pub async fn home() -> HttpResponse {
    redirect("/donations/")
}

/// Render every recorded donation.
#[get("/donations/")]
pub async fn list_donations(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let records = state.donations_query.list_donations().await?;
    Ok(html(state.templates.donations(&records)?))
}

/// Render the donation form for signed-in users.
#[get("/create/")]
pub async fn create_form(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    if session.username()?.is_none() {
        return Ok(redirect("/login/"));
    }
    Ok(html(state.templates.create_form(None)?))
}

/// Record a donation, re-rendering the form when input is rejected.
#[post("/create/")]
pub async fn create_donation(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: Option<web::Form<CreateDonationForm>>,
) -> ApiResult<HttpResponse> {
    if session.username()?.is_none() {
        return Ok(redirect("/login/"));
    }
    let form = form.map(web::Form::into_inner).unwrap_or_default();

    match state.donations.record_donation(form.into()).await? {
        RecordDonationOutcome::Recorded { .. } => Ok(redirect("/donations/")),
        RecordDonationOutcome::Rejected(rejection) => {
            let message = rejection.to_string();
            Ok(html(state.templates.create_form(Some(&message))?))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::http::{
        location, login_request, seed_user, session_cookie, test_app,
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

    macro_rules! signed_in {
        ($app:expr) => {{
            let res = test::call_service(&$app, login_request().to_request()).await;
            session_cookie(&res).expect("login sets a session cookie")
        }};
    }

    #[rstest]
    #[actix_web::test]
    async fn root_redirects_to_listing(store: Arc<InMemoryStore>) {
        let app = test::init_service(test_app(&store)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res).as_deref(), Some("/donations/"));
    }

    #[rstest]
    #[actix_web::test]
    async fn empty_listing_renders(store: Arc<InMemoryStore>) {
        let app = test::init_service(test_app(&store)).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/donations/").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8");
        assert_eq!(body.matches("<li>").count(), 0);
    }

    #[rstest]
    #[case::form("GET")]
    #[case::submit("POST")]
    #[actix_web::test]
    async fn create_requires_a_session(store: Arc<InMemoryStore>, #[case] method: &str) {
        let app = test::init_service(test_app(&store)).await;
        let req = match method {
            "GET" => test::TestRequest::get(),
            _ => test::TestRequest::post().set_form([("name", "bob"), ("amount", "50")]),
        };
        let res = test::call_service(&app, req.uri("/create/").to_request()).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res).as_deref(), Some("/login/"));
        assert!(store.donor_names().is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn signed_in_user_sees_the_form(store: Arc<InMemoryStore>) {
        let app = test::init_service(test_app(&store)).await;
        let cookie = signed_in!(app);
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/create/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_submission_records_and_redirects(store: Arc<InMemoryStore>) {
        let app = test::init_service(test_app(&store)).await;
        let cookie = signed_in!(app);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/create/")
                .cookie(cookie)
                .set_form([("name", "bob"), ("amount", "50")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res).as_deref(), Some("/donations/"));
        assert_eq!(store.donor_names(), vec!["Bob".to_owned()]);
        let donations = store.donations();
        assert_eq!(donations.len(), 1);
        let donation = donations.first().expect("one donation");
        assert_eq!(donation.amount().get(), 50);
    }

    #[rstest]
    #[case(&[("name", ""), ("amount", "5")], "No name was entered, please enter the donor")]
    #[case(&[("amount", "5")], "No name was entered, please enter the donor")]
    #[case(&[("name", "bob"), ("amount", "abc")], "Donation amount requires a whole number, please try again.")]
    #[case(&[("name", "bob")], "Donation amount requires a whole number, please try again.")]
    #[actix_web::test]
    async fn rejected_submission_rerenders_with_message(
        store: Arc<InMemoryStore>,
        #[case] fields: &[(&str, &str)],
        #[case] message: &str,
    ) {
        let app = test::init_service(test_app(&store)).await;
        let cookie = signed_in!(app);
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/create/")
                .cookie(cookie)
                .set_form(fields)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8");
        assert!(body.contains(message), "missing {message:?} in {body}");
        assert!(store.donations().is_empty());
    }
}
