//! # Error Types
//!
//! Machine-readable error codes and the JSON error body shared by both tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes returned by the application server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Negative or otherwise unusable number.
    InvalidNumber,
    /// Number already persisted.
    DuplicateNumber,
    /// Number is not `last + 1`.
    SequenceViolation,
    /// The store refused or failed the write.
    SaveError,
    /// Catch-all for faults outside the taxonomy.
    UnexpectedError,
}

impl ErrorCode {
    /// Wire representation, e.g. `DUPLICATE_NUMBER`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidNumber => "INVALID_NUMBER",
            ErrorCode::DuplicateNumber => "DUPLICATE_NUMBER",
            ErrorCode::SequenceViolation => "SEQUENCE_VIOLATION",
            ErrorCode::SaveError => "SAVE_ERROR",
            ErrorCode::UnexpectedError => "UNEXPECTED_ERROR",
        }
    }

    /// HTTP status the application server answers with for this code.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::InvalidNumber | ErrorCode::SequenceViolation => 400,
            ErrorCode::DuplicateNumber => 409,
            ErrorCode::SaveError | ErrorCode::UnexpectedError => 500,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON error body.
///
/// Application-server failures always carry a `code`; gateway-originated
/// failures (`BadRequest`, `ServiceUnavailable`) carry only `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl ErrorResponse {
    /// Error body with a machine-readable code.
    pub fn coded(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(code),
        }
    }

    /// Error body with only a message.
    pub fn plain(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }
}
