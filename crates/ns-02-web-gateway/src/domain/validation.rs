//! # Structural Validation
//!
//! Checks that a `/process` payload carries a non-negative integer `number`.
//! Sequence rules are the application server's business; nothing here looks
//! at previously submitted values.
//!
//! ## Coercion
//!
//! | Input                          | Outcome                       |
//! |--------------------------------|-------------------------------|
//! | JSON integer                   | accepted                      |
//! | float                          | truncated toward zero (`2.5 → 2`, `-0.5 → 0`) |
//! | bool                           | `true → 1`, `false → 0`       |
//! | string holding an integer      | accepted (`" 7 " → 7`)        |
//! | fractional string (`"2.5"`)    | "Number must be an integer"   |
//! | null, array, object            | "Number must be an integer"   |
//! | outside `i64`                  | "Number must be an integer"   |

use serde_json::Value;

use super::error::{GatewayError, INVALID_JSON, MISSING_NUMBER, NEGATIVE_NUMBER, NOT_AN_INTEGER};

/// Validate a raw request body.
pub fn validate_payload(body: &[u8]) -> Result<i64, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GatewayError::BadRequest(MISSING_NUMBER));
    }
    let value: Value =
        serde_json::from_slice(body).map_err(|_| GatewayError::BadRequest(INVALID_JSON))?;
    validate_input(&value)
}

/// Validate a parsed request body.
pub fn validate_input(data: &Value) -> Result<i64, GatewayError> {
    let raw = data
        .as_object()
        .and_then(|fields| fields.get("number"))
        .ok_or(GatewayError::BadRequest(MISSING_NUMBER))?;

    let number = coerce_integer(raw).ok_or(GatewayError::BadRequest(NOT_AN_INTEGER))?;

    if number < 0 {
        return Err(GatewayError::BadRequest(NEGATIVE_NUMBER));
    }
    Ok(number)
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_f64)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truncate_f64(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}
