//! Per-donor lookup page.
//!
//! ```text
//! GET  /single/  -> lookup form
//! POST /single/  name=<exact donor name>
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{html, redirect};
use crate::inbound::http::state::HttpState;

/// Message shown when no donor has the submitted name.
pub const DONOR_NOT_FOUND_MESSAGE: &str = "That name was not found, please enter a donor's name.";

/// Form body for `POST /single/`.
#[derive(Debug, Default, Deserialize)]
pub struct LookupForm {
    /// Donor name, matched exactly.
    pub name: Option<String>,
}

/// Render the lookup form.
#[get("/single/")]
pub async fn lookup_form(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(html(state.templates.lookup_form(None)?))
}

/// Show every donation from the named donor.
///
/// The name is matched exactly. A submission without a `name` field goes
/// back to the full listing.
#[post("/single/")]
pub async fn lookup_donor(
    state: web::Data<HttpState>,
    form: Option<web::Form<LookupForm>>,
) -> ApiResult<HttpResponse> {
    let Some(name) = form.and_then(|form| form.into_inner().name) else {
        return Ok(redirect("/donations/"));
    };

    match state.donations_query.donations_for_donor(&name).await? {
        Some(found) => Ok(html(
            state
                .templates
                .donor_donations(found.donor.name().as_ref(), &found.donations)?,
        )),
        None => Ok(html(
            state.templates.lookup_form(Some(DONOR_NOT_FOUND_MESSAGE))?,
        )),
    }
}
