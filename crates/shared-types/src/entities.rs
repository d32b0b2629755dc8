//! # Wire Entities
//!
//! Request and response bodies for the `/process`, `/numbers` and `/` routes.

use serde::{Deserialize, Serialize};

/// Body of `POST /process` as accepted by the application server.
///
/// The number is signed on the wire so that negative submissions reach the
/// domain check and are rejected with `INVALID_NUMBER` instead of a parse
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// The submitted number.
    pub number: i64,
}

impl ProcessRequest {
    /// Create a request for `number`.
    pub fn new(number: i64) -> Self {
        Self { number }
    }
}

/// Successful `POST /process` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Next expected value (`processed_number + 1`).
    pub result: u64,
    /// The number that was persisted.
    pub processed_number: u64,
}

impl ProcessResponse {
    /// Build the response for an accepted number.
    ///
    /// `number` comes from a non-negative `i64`, so the increment cannot
    /// overflow `u64`.
    pub fn accepted(number: u64) -> Self {
        Self {
            result: number + 1,
            processed_number: number,
        }
    }
}

/// `GET /numbers` body: every persisted number in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumbersResponse {
    pub processed_numbers: Vec<u64>,
}

/// `GET /` body of the application server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

impl ServiceInfo {
    pub fn running(service: &str, version: &str) -> Self {
        Self {
            message: format!("{service} is running"),
            version: version.to_string(),
        }
    }
}
