//! # Sequence Rules
//!
//! The two pure checks of `Process`. Store-dependent checks (duplication,
//! persistence) live in the service.

use super::errors::SequenceError;

/// Reject negative numbers and narrow the rest to `u64`.
pub fn require_non_negative(number: i64) -> Result<u64, SequenceError> {
    u64::try_from(number).map_err(|_| SequenceError::InvalidNumber { number })
}

/// Check that `number` continues a sequence whose largest member is `last`.
///
/// An empty sequence (`last == None`) accepts any first value.
pub fn check_continuity(number: u64, last: Option<u64>) -> Result<(), SequenceError> {
    match last {
        None => Ok(()),
        Some(last) => {
            // `last` was itself accepted from an i64, so this cannot overflow.
            let expected = last + 1;
            if number == expected {
                Ok(())
            } else {
                Err(SequenceError::SequenceViolation {
                    received: number,
                    expected,
                })
            }
        }
    }
}
