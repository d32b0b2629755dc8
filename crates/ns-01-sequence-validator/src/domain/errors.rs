//! # Domain Errors
//!
//! Error types for the sequence validator.
//!
//! ## Design Principles
//!
//! - `SequenceError` is the complete set of outcomes a caller can see; each
//!   variant maps to exactly one wire `ErrorCode`.
//! - `StoreError` never leaves the service: it is folded into `SaveError` or
//!   `UnexpectedError` depending on where it happened.

use shared_types::{ErrorCode, ErrorResponse};
use thiserror::Error;

/// Message returned for faults outside the taxonomy while processing.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when the persisted list cannot be read.
pub const LIST_FAILED_MESSAGE: &str = "Failed to retrieve numbers";

/// Errors returned by the validator's operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Submitted number is negative.
    #[error("Number must be non-negative")]
    InvalidNumber { number: i64 },

    /// Request body could not be read as `{ "number": integer }`.
    #[error("Invalid request: {reason}")]
    MalformedRequest { reason: String },

    /// Number is already persisted.
    #[error("Duplicate number: {number}")]
    DuplicateNumber { number: u64 },

    /// Number does not continue the persisted sequence.
    #[error("Sequence violation: received {received}, expected {expected}")]
    SequenceViolation { received: u64, expected: u64 },

    /// The store could not persist the number, or could not tell what the
    /// last persisted number is.
    #[error("Failed to save number: {number}")]
    SaveError { number: u64, reason: String },

    /// Any other store fault.
    #[error("{message}")]
    Unexpected {
        message: &'static str,
        reason: String,
    },
}

impl SequenceError {
    /// Machine-readable wire code.
    pub fn code(&self) -> ErrorCode {
        match self {
            SequenceError::InvalidNumber { .. } | SequenceError::MalformedRequest { .. } => {
                ErrorCode::InvalidNumber
            }
            SequenceError::DuplicateNumber { .. } => ErrorCode::DuplicateNumber,
            SequenceError::SequenceViolation { .. } => ErrorCode::SequenceViolation,
            SequenceError::SaveError { .. } => ErrorCode::SaveError,
            SequenceError::Unexpected { .. } => ErrorCode::UnexpectedError,
        }
    }

    /// HTTP status for this error.
    pub fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// JSON body for this error. Internal reasons stay in the logs.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::coded(self.code(), self.to_string())
    }

    pub(crate) fn unexpected(message: &'static str, source: &StoreError) -> Self {
        SequenceError::Unexpected {
            message,
            reason: source.to_string(),
        }
    }

    pub(crate) fn save_failed(number: u64, source: &StoreError) -> Self {
        SequenceError::SaveError {
            number,
            reason: source.to_string(),
        }
    }
}

/// Errors raised by `NumberStore` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Unique constraint on `number` rejected the insert.
    #[error("number {number} is already stored")]
    DuplicateKey { number: u64 },

    /// The backend cannot be reached or opened.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    /// Read or write failed.
    #[error("store I/O error: {message}")]
    Io { message: String },

    /// Persisted data does not decode.
    #[error("store data corrupted: {message}")]
    Corrupted { message: String },

    /// Another process holds the store.
    #[error("store at {path} is locked by another process")]
    Locked { path: String },

    /// The handle was closed during shutdown.
    #[error("store is closed")]
    Closed,
}

impl StoreError {
    pub fn io(message: impl Into<String>) -> Self {
        StoreError::Io {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }

    pub fn corrupted(message: impl Into<String>) -> Self {
        StoreError::Corrupted {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::io(e.to_string())
    }
}
