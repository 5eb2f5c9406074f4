//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each
//! [`ErrorCode`] to a status code; callers branch on the code rather than
//! on message text.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Closed set of failure categories surfaced by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or missing required fields.
    InvalidRequest,
    /// No matching row or document exists.
    NotFound,
    /// The owning user already holds the maximum number of accounts.
    AccountLimitExceeded,
    /// The primary store rejected or failed a write.
    PrimaryWriteFailed,
    /// The secondary store failed a write after the primary write committed.
    SecondaryWriteFailed,
    /// The document store reported a key other than the one written.
    IntegrityViolation,
    /// A store could not be reached or the request deadline elapsed.
    ServiceUnavailable,
    /// An unexpected failure inside the service.
    InternalError,
}

impl ErrorCode {
    /// Stable snake_case label used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::AccountLimitExceeded => "account_limit_exceeded",
            Self::PrimaryWriteFailed => "primary_write_failed",
            Self::SecondaryWriteFailed => "secondary_write_failed",
            Self::IntegrityViolation => "integrity_violation",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error: a tagged kind plus a human-readable message.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use registry_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("user 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "user 42 not found");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if the message is blank.
    ///
    /// Captures the current trace identifier if one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Failure category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to callers.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured at construction, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured context for logs and operators.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use registry_backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::secondary_write_failed("document store down")
    ///     .with_details(json!({ "primaryId": "abc" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::AccountLimitExceeded`].
    pub fn account_limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AccountLimitExceeded, message)
    }

    /// Convenience constructor for [`ErrorCode::PrimaryWriteFailed`].
    pub fn primary_write_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PrimaryWriteFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::SecondaryWriteFailed`].
    pub fn secondary_write_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SecondaryWriteFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::IntegrityViolation`].
    pub fn integrity_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IntegrityViolation, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
