//! Shared helpers for registry integration tests.
//!
//! Each integration test compiles as its own crate, so not every helper is
//! used by every test binary.
#![allow(dead_code)]

pub mod cluster_skip;
pub mod pg_embed;

/// Primary store DDL shipped with the service.
pub const PRIMARY_SCHEMA: &str = include_str!("../../schema/primary.sql");

/// Render a `postgres` error with the SQLSTATE and server message.
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

/// Apply the primary schema to the database at `database_url`.
pub fn apply_primary_schema(database_url: &str) -> Result<(), String> {
    let mut client = postgres::Client::connect(database_url, postgres::NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(PRIMARY_SCHEMA)
        .map_err(|err| format_postgres_error(&err))
}

/// Truncate both primary tables so each test starts empty.
pub fn reset_primary_tables(database_url: &str) -> Result<(), String> {
    let mut client = postgres::Client::connect(database_url, postgres::NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("TRUNCATE accounts, users")
        .map_err(|err| format_postgres_error(&err))
}
