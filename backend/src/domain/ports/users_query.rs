//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading the user directory.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user; an empty directory yields an empty list.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return a single user or a `NotFound` error.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}
