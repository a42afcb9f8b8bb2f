//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{
    Donation, DonationAmount, DonationId, DonationRecord, Donor, DonorId, DonorName,
};

use super::schema::{donations, donors, users};

/// Row struct for reading from the donors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonorRow {
    pub id: i32,
    pub name: String,
}

impl From<DonorRow> for Donor {
    fn from(row: DonorRow) -> Self {
        Self::new(DonorId::new(row.id), DonorName::from_stored(row.name))
    }
}

/// Insertable struct for creating donors.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = donors)]
pub(crate) struct NewDonorRow<'a> {
    pub name: &'a str,
}

/// Row struct for reading from the donations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonationRow {
    pub id: i32,
    pub donor_id: i32,
    pub value: i64,
}

impl From<DonationRow> for Donation {
    fn from(row: DonationRow) -> Self {
        Self::new(
            DonationId::new(row.id),
            DonorId::new(row.donor_id),
            DonationAmount::new(row.value),
        )
    }
}

/// Build a listing entry from a donation joined with its donor.
pub(crate) fn donation_record((donation, donor): (DonationRow, DonorRow)) -> DonationRecord {
    DonationRecord::new(
        DonationId::new(donation.id),
        Donor::from(donor),
        DonationAmount::new(donation.value),
    )
}

/// Insertable struct for creating donations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = donations)]
pub(crate) struct NewDonationRow {
    pub donor_id: i32,
    pub value: i64,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub name: String,
    pub password: String,
}

/// Insertable struct for creating users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub password: &'a str,
}
