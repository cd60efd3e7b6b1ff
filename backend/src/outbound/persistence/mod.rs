//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain types.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never reach the domain layer.
//! - **Per-call connections**: every repository call checks a connection out
//!   of the `bb8` pool through `diesel-async`.
//! - **Typed errors**: Diesel and pool failures become `UserPersistenceError`.
//!
//! # Example
//!
//! ```no_run
//! use users_backend::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, ensure_schema,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/crud_new")).await?;
//! ensure_schema(&pool).await?;
//! let repo = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod diesel_error_mapping;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::{CREATE_EMAIL_INDEX, CREATE_USERS_TABLE, ensure_schema};
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
