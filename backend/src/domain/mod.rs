//! Domain primitives, ports and services.
//!
//! Purpose: define the user entity, the transport-agnostic error model and
//! the ports separating HTTP handlers from the store. Types validate on
//! construction so handlers and adapters only ever see well-formed values.
//!
//! Public surface:
//! - `Error` / `ErrorCode` : failure taxonomy shared by every adapter.
//! - `User`, `UserDraft`, `UserId`, `UserName`, `EmailAddress` : the entity.
//! - `UserService` : implements the driving ports over a `UserRepository`.
//! - `TraceId` : request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserDraft, UserId, UserName, UserValidationError};
pub use self::user_service::{DUPLICATE_EMAIL_MESSAGE, USER_NOT_FOUND_MESSAGE, UserService};
