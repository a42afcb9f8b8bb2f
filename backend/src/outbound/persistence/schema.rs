//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// People and organisations that have donated.
    donors (id) {
        /// Surrogate key.
        id -> Int4,
        /// Normalised, unique donor name.
        name -> Varchar,
    }
}

diesel::table! {
    /// Individual donations, each linked to one donor.
    donations (id) {
        /// Surrogate key; also the listing order.
        id -> Int4,
        /// Foreign key into `donors`.
        donor_id -> Int4,
        /// Whole-number amount.
        value -> Int8,
    }
}

diesel::table! {
    /// Accounts allowed to record donations.
    users (id) {
        /// Surrogate key.
        id -> Int4,
        /// Unique login name.
        name -> Varchar,
        /// PBKDF2 PHC string.
        password -> Varchar,
    }
}

diesel::joinable!(donations -> donors (donor_id));

diesel::allow_tables_to_appear_in_same_query!(donors, donations, users);
