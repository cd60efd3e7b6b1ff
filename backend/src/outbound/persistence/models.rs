//! Internal Diesel row structs for the `users` table.
//!
//! These types never leave the persistence layer; the repository converts
//! them into domain values.

use diesel::prelude::*;

use super::schema::users;
use crate::domain::{EmailAddress, User, UserDraft, UserId, UserName, UserValidationError};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserValidationError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self::new(
            UserId::new(row.id)?,
            UserName::new(row.name)?,
            EmailAddress::new(row.email)?,
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a UserDraft> for NewUserRow<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            name: draft.name().as_ref(),
            email: draft.email().as_ref(),
        }
    }
}

/// Changeset struct replacing name and email of an existing record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a UserDraft> for UserChangeset<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            name: draft.name().as_ref(),
            email: draft.email().as_ref(),
        }
    }
}
