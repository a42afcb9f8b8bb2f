//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! helpers shared between suites live here and are pulled in with
//! `mod support;`.

pub mod embedded_postgres;

pub use embedded_postgres::{TestDatabase, handle_cluster_setup_failure};

/// Render a `postgres` error with its SQLSTATE and message.
///
/// The `Display` output of `postgres::Error` collapses server errors to
/// `db error`, which hides what actually went wrong.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}
