//! Server-side HTML rendering.
//!
//! Templates are compiled into the binary and rendered with `minijinja`.
//! Every template name ends in `.html`, which turns on HTML auto-escaping for
//! interpolated donor names and messages.

use minijinja::{Environment, context};
use serde::Serialize;

use crate::domain::{DonationRecord, Error};

const SOURCES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../../templates/base.html")),
    (
        "donations.html",
        include_str!("../../../templates/donations.html"),
    ),
    ("create.html", include_str!("../../../templates/create.html")),
    ("login.html", include_str!("../../../templates/login.html")),
    ("single.html", include_str!("../../../templates/single.html")),
];

/// One row of a donation listing.
#[derive(Debug, Serialize)]
struct DonationRow<'a> {
    donor: &'a str,
    value: i64,
}

fn rows(records: &[DonationRecord]) -> Vec<DonationRow<'_>> {
    records
        .iter()
        .map(|record| DonationRow {
            donor: record.donor().name().as_ref(),
            value: record.amount().get(),
        })
        .collect()
}

/// Compiled page templates.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile the embedded templates.
    ///
    /// # Errors
    /// Returns the `minijinja` syntax error for a broken template.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in SOURCES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, Error> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|err| Error::internal(format!("failed to render {name}: {err}")))
    }

    /// Render the full donation listing.
    pub fn donations(&self, records: &[DonationRecord]) -> Result<String, Error> {
        self.render("donations.html", context! { donations => rows(records) })
    }

    /// Render the donation form, optionally with a validation message.
    pub fn create_form(&self, error: Option<&str>) -> Result<String, Error> {
        self.render("create.html", context! { error => error })
    }

    /// Render the login form, optionally with a failure message.
    pub fn login_form(&self, error: Option<&str>) -> Result<String, Error> {
        self.render("login.html", context! { error => error })
    }

    /// Render the donor lookup form with an optional message.
    pub fn lookup_form(&self, error: Option<&str>) -> Result<String, Error> {
        self.render("single.html", context! { error => error })
    }

    /// Render the donor lookup page with one donor's donations.
    pub fn donor_donations(
        &self,
        donor: &str,
        records: &[DonationRecord],
    ) -> Result<String, Error> {
        self.render(
            "single.html",
            context! { donor => donor, donations => rows(records) },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DonationAmount, DonationId, Donor, DonorId, DonorName};
    use rstest::{fixture, rstest};

    #[fixture]
    fn templates() -> Templates {
        Templates::new().expect("embedded templates compile")
    }

    fn record(id: i32, name: &str, value: i64) -> DonationRecord {
        DonationRecord::new(
            DonationId::new(id),
            Donor::new(DonorId::new(id), DonorName::normalise(name).expect("name")),
            DonationAmount::new(value),
        )
    }

    #[rstest]
    fn listing_renders_each_donation(templates: Templates) {
        let html = templates
            .donations(&[record(1, "ann", 5), record(2, "ben", -3)])
            .expect("render");
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.contains("<b>Ann</b>: 5"));
        assert!(html.contains("<b>Ben</b>: -3"));
    }

    #[rstest]
    fn empty_listing_has_no_rows(templates: Templates) {
        let html = templates.donations(&[]).expect("render");
        assert_eq!(html.matches("<li>").count(), 0);
    }

    #[rstest]
    fn donor_names_are_escaped(templates: Templates) {
        let html = templates
            .donations(&[record(1, "<script>", 1)])
            .expect("render");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[rstest]
    fn forms_show_messages_only_when_given(templates: Templates) {
        let plain = templates.login_form(None).expect("render");
        assert!(!plain.contains("class=\"error\""));
        let failed = templates
            .login_form(Some("Incorrect username or password."))
            .expect("render");
        assert!(failed.contains("Incorrect username or password."));
    }

    #[rstest]
    fn lookup_page_lists_the_donor(templates: Templates) {
        let html = templates
            .donor_donations("Ann", &[record(1, "ann", 5), record(3, "ann", 7)])
            .expect("render");
        assert!(html.contains("<h2>Ann</h2>"));
        assert_eq!(html.matches("<li>").count(), 2);
    }
}
