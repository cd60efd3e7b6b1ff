//! Domain ports.
//!
//! Driving ports (`UsersCommand`, `UsersQuery`) are what inbound adapters
//! call. The driven port (`UserRepository`) is what outbound adapters
//! implement.

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
