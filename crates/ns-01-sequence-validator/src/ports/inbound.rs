//! # Inbound Ports (Driving Ports)
//!
//! The API the HTTP adapter drives.

use shared_types::ValidatorHealth;

use crate::domain::entities::AcceptedNumber;
use crate::domain::errors::SequenceError;

/// Primary API of the application server.
///
/// Implementations must enforce the sequence invariant: once non-empty, the
/// persisted set is contiguous and every accepted number is `max + 1`.
pub trait SequenceValidatorApi: Send + Sync {
    /// Validate and persist a submitted number.
    ///
    /// ## Errors
    ///
    /// - `InvalidNumber`: `number < 0`
    /// - `DuplicateNumber`: already persisted
    /// - `SequenceViolation`: store non-empty and `number != max + 1`
    /// - `SaveError`: last value unreadable, or the insert failed
    /// - `Unexpected`: duplicate lookup failed
    fn process(&self, number: i64) -> Result<AcceptedNumber, SequenceError>;

    /// All persisted numbers, ascending.
    fn list_numbers(&self) -> Result<Vec<u64>, SequenceError>;

    /// Store connectivity.
    fn health(&self) -> ValidatorHealth;
}
