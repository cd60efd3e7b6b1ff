//! `bb8` pool of async Diesel connections to PostgreSQL.
//!
//! Repository calls check a connection out per statement; dropping the guard
//! returns it.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available in time, or connecting failed.
    #[error("connection checkout failed: {0}")]
    Checkout(String),
    /// The pool could not be created.
    #[error("pool construction failed: {0}")]
    Build(String),
}

impl PoolError {
    /// Underlying cause without the variant prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Checkout(message) | Self::Build(message) => message,
        }
    }
}

/// Connection target and sizing for [`DbPool`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    checkout_timeout: Duration,
}

impl PoolConfig {
    /// Ten connections, no idle floor, thirty second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            min_idle: None,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    pub fn with_max_size(self, max_size: u32) -> Self {
        Self { max_size, ..self }
    }

    pub fn with_min_idle(self, min_idle: Option<u32>) -> Self {
        Self { min_idle, ..self }
    }

    pub fn with_checkout_timeout(self, checkout_timeout: Duration) -> Self {
        Self {
            checkout_timeout,
            ..self
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Shared handle to the connection pool; clones share connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. With `min_idle` set, bb8 opens those connections
    /// eagerly, so an unreachable database fails here.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
            min_idle,
            checkout_timeout,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        Pool::builder()
            .max_size(max_size)
            .min_idle(min_idle)
            .connection_timeout(checkout_timeout)
            .build(manager)
            .await
            .map(|inner| Self { inner })
            .map_err(|err| PoolError::Build(err.to_string()))
    }

    /// Check out a connection, waiting at most the configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::Checkout(err.to_string()))
    }
}
