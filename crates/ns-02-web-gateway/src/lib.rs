//! NS-02 Web Gateway - the front-facing web server.
//!
//! Accepts `{ "number": ... }`, checks it is a non-negative integer and relays
//! it to the application server. Whatever the application server answers is
//! returned to the caller unchanged.
//!
//! # Architecture
//!
//! ```text
//! caller ──► router (axum + TraceLayer)
//!               │
//!               ▼
//!          GatewayService ── validate_payload (400 on failure)
//!               │
//!               ▼
//!          ApplicationServer port ── HttpApplicationServer (reqwest)
//!               │
//!               ▼
//!          application server  (503 when unreachable or timed out)
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod router;
pub mod service;

pub use adapters::HttpApplicationServer;
pub use domain::{GatewayConfig, GatewayConfigError, GatewayError, UpstreamConfig};
pub use ports::{ApplicationServer, RelayError, RelayedResponse};
pub use router::{create_router, serve};
pub use service::GatewayService;
