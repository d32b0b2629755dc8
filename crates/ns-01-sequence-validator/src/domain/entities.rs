//! # Domain Entities

use shared_types::ProcessResponse;

/// A number that passed every check and was persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedNumber {
    number: u64,
}

impl AcceptedNumber {
    pub(crate) fn new(number: u64) -> Self {
        Self { number }
    }

    /// The persisted number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// The value the sequence expects next.
    pub fn next_expected(&self) -> u64 {
        self.number + 1
    }
}

impl From<AcceptedNumber> for ProcessResponse {
    fn from(accepted: AcceptedNumber) -> Self {
        ProcessResponse::accepted(accepted.number)
    }
}
