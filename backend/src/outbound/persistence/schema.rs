//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the DDL in `bootstrap.rs` exactly.

diesel::table! {
    /// Registered users.
    ///
    /// `email` carries the `users_email_key` unique constraint.
    users (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        /// Non-empty display name.
        name -> Varchar,
        /// Unique email address.
        email -> Varchar,
    }
}
