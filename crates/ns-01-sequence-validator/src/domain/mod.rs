//! Domain layer for the sequence validator.
//!
//! Pure sequence rules, error taxonomy and configuration. No I/O lives here.

pub mod config;
pub mod entities;
pub mod errors;
pub mod sequence;

pub use config::{ConfigError, HttpConfig, RetryPolicy, StoreLocation, ValidatorConfig};
pub use entities::AcceptedNumber;
pub use errors::{SequenceError, StoreError};
pub use sequence::{check_continuity, require_non_negative};
