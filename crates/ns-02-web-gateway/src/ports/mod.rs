//! Hexagonal ports for the web gateway.

pub mod outbound;

pub use outbound::{ApplicationServer, RelayError, RelayedResponse};
