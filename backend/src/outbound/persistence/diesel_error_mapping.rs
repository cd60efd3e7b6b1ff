//! Mapping from Diesel and pool failures to user persistence errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;
use crate::domain::ports::UserPersistenceError;

/// Unique index guarding case-insensitive email uniqueness; see `bootstrap.rs`.
pub(crate) const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub(crate) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_unique_violation(constraint_name: Option<&str>) -> UserPersistenceError {
    match constraint_name {
        None => UserPersistenceError::DuplicateEmail,
        Some(name) if name == EMAIL_UNIQUE_CONSTRAINT => UserPersistenceError::DuplicateEmail,
        Some(name) => {
            warn!(
                constraint_name = name,
                "unrecognised unique violation on users table"
            );
            UserPersistenceError::query("unique constraint violation")
        }
    }
}

pub(crate) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            map_unique_violation(info.constraint_name())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => UserPersistenceError::query("database error"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        _ => UserPersistenceError::query("database error"),
    }
}
