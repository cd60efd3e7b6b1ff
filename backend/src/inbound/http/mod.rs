//! HTTP inbound adapter exposing REST endpoints, probes and the browser UI.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod ui;
pub mod users;
pub mod validation;

pub use error::ApiResult;
