//! Idempotent schema bootstrap for the `users` table.
//!
//! Runs once at startup. This is not a migration system: the statements only
//! create the table and its email index when absent and never alter them.

use diesel_async::RunQueryDsl;
use tracing::info;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use crate::domain::ports::UserPersistenceError;

/// DDL for the users table. Keep in sync with `schema.rs`.
pub const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL
)";

/// Case-insensitive email uniqueness. The index name is the constraint name
/// reported on violation.
pub const CREATE_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (lower(email))";

/// Create the users table if it does not exist yet.
///
/// # Errors
///
/// Returns `UserPersistenceError::Connection` when no connection can be
/// checked out, and `UserPersistenceError::Query` when the DDL fails.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), UserPersistenceError> {
    let mut conn = pool.get().await.map_err(map_pool_error)?;
    for statement in [CREATE_USERS_TABLE, CREATE_EMAIL_INDEX] {
        diesel::sql_query(statement)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
    }
    info!("users table ready");
    Ok(())
}
