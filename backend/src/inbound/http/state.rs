//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::UserService;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(users_command: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self {
            users_command,
            users_query,
        }
    }

    /// Wire both ports to a single [`UserService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use users_backend::domain::ports::InMemoryUserRepository;
    /// use users_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
    /// # let _ = state;
    /// ```
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: UserRepository + 'static,
    {
        let service = Arc::new(UserService::new(repository));
        Self::new(service.clone(), service)
    }
}
