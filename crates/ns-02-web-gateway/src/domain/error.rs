//! Gateway error types.
//!
//! Gateway-originated failures carry only `{ "error": message }`. Failures
//! produced by the application server are relayed untouched and never pass
//! through this type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_types::ErrorResponse;
use thiserror::Error;

pub const MISSING_NUMBER: &str = "Missing 'number' field";
pub const NOT_AN_INTEGER: &str = "Number must be an integer";
pub const NEGATIVE_NUMBER: &str = "Number must be non-negative";
pub const INVALID_JSON: &str = "Request body must be valid JSON";
pub const UNREADABLE_BODY: &str = "Request body could not be read";
pub const UPSTREAM_UNAVAILABLE: &str = "Application server unavailable";
pub const NUMBERS_FAILED: &str = "Failed to get numbers";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Errors raised by the gateway itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Submitted payload failed structural validation.
    #[error("{0}")]
    BadRequest(&'static str),

    /// Application server could not be reached or timed out.
    #[error("Application server unavailable")]
    ServiceUnavailable,

    /// Application server answered `/numbers` with a non-200 status.
    #[error("Failed to get numbers")]
    NumbersUnavailable { status: u16 },

    /// Anything else.
    #[error("Internal server error")]
    Internal { reason: String },
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::NumbersUnavailable { .. } | GatewayError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::plain(self.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
