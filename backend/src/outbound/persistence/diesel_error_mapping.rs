//! Diesel and pool error mapping for the primary store adapter.

use tracing::debug;

use crate::domain::ports::PrimaryStoreError;

use super::pool::PoolError;

/// Map pool errors to primary store connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> PrimaryStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            PrimaryStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to primary store errors.
///
/// Database messages are logged at debug level and replaced with stable
/// descriptions in the returned error.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> PrimaryStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => PrimaryStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => PrimaryStoreError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            PrimaryStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PrimaryStoreError::query("duplicate identifier")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            PrimaryStoreError::query("referenced user does not exist")
        }
        _ => PrimaryStoreError::query("database error"),
    }
}
