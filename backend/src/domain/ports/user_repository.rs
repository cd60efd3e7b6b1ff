//! Port abstraction for user persistence adapters and their errors.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// The email is already held by another user.
    #[error("user repository rejected duplicate email")]
    DuplicateEmail,
}

impl UserPersistenceError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port over the `users` table.
///
/// Each method maps to exactly one statement against the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the store-assigned identifier.
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError>;

    /// Fetch every user ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Replace name and email of an existing user.
    ///
    /// Returns `false` when no row matched `id`.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<bool, UserPersistenceError>;

    /// Remove a user permanently.
    ///
    /// Returns `false` when no row matched `id`.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    last_id: i64,
    users: BTreeMap<UserId, User>,
}

impl InMemoryState {
    fn email_taken(&self, draft: &UserDraft, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|user| {
                user.email().matches_ignoring_case(draft.email()) && Some(user.id()) != except
            })
    }
}

/// Process-local repository used when no database is configured and in tests.
///
/// Mirrors the store contract: identifiers start at 1 and are never reused,
/// and emails are unique ignoring case.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut InMemoryState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());
        f(&mut state)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError> {
        self.with_state(|state| {
            if state.email_taken(draft, None) {
                return Err(UserPersistenceError::DuplicateEmail);
            }
            let id = UserId::new(state.last_id + 1)
                .map_err(|err| UserPersistenceError::query(err.to_string()))?;
            state.last_id = id.get();
            state.users.insert(id, draft.clone().into_user(id));
            Ok(id)
        })
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.with_state(|state| state.users.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.with_state(|state| state.users.get(&id).cloned()))
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<bool, UserPersistenceError> {
        self.with_state(|state| {
            if !state.users.contains_key(&id) {
                return Ok(false);
            }
            if state.email_taken(draft, Some(id)) {
                return Err(UserPersistenceError::DuplicateEmail);
            }
            state.users.insert(id, draft.clone().into_user(id));
            Ok(true)
        })
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.with_state(|state| state.users.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    //! Contract coverage for the in-memory repository.
    use super::*;
    use rstest::{fixture, rstest};

    fn draft(name: &str, email: &str) -> UserDraft {
        UserDraft::try_from_strings(name, email).expect("valid draft")
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_increasing_ids(repo: InMemoryUserRepository) {
        let first = repo.insert(&draft("Ada", "ada@example.com")).await.expect("insert");
        let second = repo.insert(&draft("Bob", "bob@example.com")).await.expect("insert");

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[rstest]
    #[case("dup@example.com")]
    #[case("DUP@Example.com")]
    #[tokio::test]
    async fn insert_rejects_duplicate_email(
        repo: InMemoryUserRepository,
        #[case] second_email: &str,
    ) {
        repo.insert(&draft("Ada", "dup@example.com")).await.expect("insert");

        let err = repo
            .insert(&draft("Ada Two", second_email))
            .await
            .expect_err("duplicate email");

        assert_eq!(err, UserPersistenceError::DuplicateEmail);
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_not_reused_after_delete(repo: InMemoryUserRepository) {
        let first = repo.insert(&draft("Ada", "ada@example.com")).await.expect("insert");
        assert!(repo.delete(first).await.expect("delete"));

        let second = repo.insert(&draft("Bob", "bob@example.com")).await.expect("insert");
        assert!(second > first);
    }

    #[rstest]
    #[tokio::test]
    async fn update_allows_keeping_own_email(repo: InMemoryUserRepository) {
        let id = repo.insert(&draft("Ada", "ada@example.com")).await.expect("insert");

        let updated = repo
            .update(id, &draft("Ada L.", "ada@example.com"))
            .await
            .expect("update");

        assert!(updated);
        let user = repo.find_by_id(id).await.expect("find").expect("present");
        assert_eq!(user.name().as_ref(), "Ada L.");
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_email_of_another_user(repo: InMemoryUserRepository) {
        repo.insert(&draft("Ada", "ada@example.com")).await.expect("insert");
        let bob = repo.insert(&draft("Bob", "bob@example.com")).await.expect("insert");

        let err = repo
            .update(bob, &draft("Bob", "ada@example.com"))
            .await
            .expect_err("duplicate email");

        assert_eq!(err, UserPersistenceError::DuplicateEmail);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_rows_report_false(repo: InMemoryUserRepository) {
        let missing = UserId::new(99_999).expect("valid id");

        assert!(!repo.update(missing, &draft("X", "x@example.com")).await.expect("update"));
        assert!(!repo.delete(missing).await.expect("delete"));
        assert!(repo.find_by_id(missing).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn list_is_ordered_by_id(repo: InMemoryUserRepository) {
        for (name, email) in [("C", "c@example.com"), ("A", "a@example.com")] {
            repo.insert(&draft(name, email)).await.expect("insert");
        }

        let ids: Vec<i64> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|user| user.id().get())
            .collect();

        assert_eq!(ids, vec![1, 2]);
    }
}
