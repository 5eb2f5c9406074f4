//! Domain primitives, ports, and the registration orchestrator.
//!
//! Public surface:
//! - `User`, `NewUser`, `RegisteredUser`, `UserId`: user identity and the
//!   dual-write composite result.
//! - `Account`, `NewAccount`, `AccountId`, `ACCOUNT_LIMIT`: accounts owned
//!   by primary-store users.
//! - `Error`, `ErrorCode`: transport-agnostic failures.
//! - `RegistrationService`: implements the `UserRegistry` driving port.

pub mod account;
pub mod deadline;
pub mod error;
pub mod ports;
pub mod registration_service;
pub mod trace_id;
pub mod user;

pub use self::account::{ACCOUNT_LIMIT, Account, AccountId, AccountValidationError, NewAccount};
pub use self::deadline::{DEFAULT_REQUEST_TIMEOUT, Deadline, DeadlineElapsed};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::registration_service::RegistrationService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, RegisteredUser, User, UserId, UserValidationError};

/// Convenient result alias for handlers and services.
pub type ApiResult<T> = Result<T, Error>;
