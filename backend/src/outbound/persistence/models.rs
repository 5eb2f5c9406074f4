//! Internal Diesel row structs for the primary store.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use super::schema::{accounts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub address: String,
    pub email: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub address: &'a str,
    pub email: &'a str,
}

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: String,
    pub msisdn: String,
    pub user_id: String,
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: &'a str,
    pub msisdn: &'a str,
    pub user_id: &'a str,
}
