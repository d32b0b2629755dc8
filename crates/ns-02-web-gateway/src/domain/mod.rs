//! Domain layer for the web gateway.

pub mod config;
pub mod error;
pub mod validation;

pub use config::{GatewayConfig, GatewayConfigError, UpstreamConfig};
pub use error::GatewayError;
pub use validation::{validate_input, validate_payload};
