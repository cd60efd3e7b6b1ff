//! Driving port for user mutations.
//!
//! Inbound adapters call this port to create, replace and remove users
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserId};

/// Domain use-case port for writes against the user directory.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user and return the identifier the store assigned.
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error>;

    /// Replace the name and email of an existing user.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<(), Error>;

    /// Remove a user permanently.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
