//! Hexagonal ports for the sequence validator.

pub mod inbound;
pub mod outbound;

pub use inbound::SequenceValidatorApi;
pub use outbound::NumberStore;
