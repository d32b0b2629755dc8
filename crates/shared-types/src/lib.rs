//! # Shared Types Crate
//!
//! JSON envelopes spoken by both tiers of the number-sequence relay.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: request, response and error shapes are
//!   defined once and used by the gateway, the application server and tests.
//! - **Passthrough Friendly**: the gateway relays application-server bodies
//!   verbatim, so every type here round-trips without loss.

pub mod entities;
pub mod errors;
pub mod health;

pub use entities::*;
pub use errors::*;
pub use health::*;

/// Service name reported by the application server.
pub const APPLICATION_SERVER: &str = "application-server";

/// Service name reported by the web gateway.
pub const WEB_SERVER: &str = "web-server";
