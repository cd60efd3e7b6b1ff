//! User directory service.
//!
//! Implements the `UsersCommand` and `UsersQuery` driving ports on top of any
//! `UserRepository`, translating persistence outcomes into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

/// Message returned when an email is already held by another user.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists";
/// Message returned when no user matches the requested identifier.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn not_found(id: UserId) -> Error {
    Error::not_found(USER_NOT_FOUND_MESSAGE).with_details(serde_json::json!({ "id": id.get() }))
}

/// Service exposing the user directory use-cases.
#[derive(Clone)]
pub struct UserService<R: ?Sized> {
    user_repo: Arc<R>,
}

impl<R: ?Sized> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error> {
        let id = self
            .user_repo
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %id, "user created");
        Ok(id)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<(), Error> {
        let updated = self
            .user_repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(not_found(id));
        }
        info!(user_id = %id, "user updated");
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let deleted = self
            .user_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(not_found(id));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo.list().await.map_err(map_repository_error)
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
