//! NS-01 Sequence Validator - the application server.
//!
//! Owns the persisted sequence of processed numbers. Every accepted number
//! must be new and, once the store is non-empty, exactly one greater than the
//! largest persisted number.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 SEQUENCE VALIDATOR (ns-01)                    │
//! ├──────────────────────────────────────────────────────────────┤
//! │  HTTP (axum)   POST /process  GET /numbers  GET /health  GET /│
//! │        │                                                      │
//! │        ▼                                                      │
//! │  SequenceValidatorService  (ports::inbound::SequenceValidatorApi)
//! │    1. non-negative   2. not duplicate                         │
//! │    3. continues last 4. insert                                │
//! │        │                                                      │
//! │        ▼                                                      │
//! │  NumberStore (ports::outbound)                                │
//! │    memory:// | file://PATH | rocksdb://PATH                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use ns_01_sequence_validator::{connect_with_retry, SequenceValidatorService, ValidatorConfig};
//!
//! let config = ValidatorConfig::from_env()?;
//! let store = connect_with_retry(&config.store, &config.retry).await?;
//! let service = SequenceValidatorService::new(store);
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports for public API
pub use adapters::connect::{connect_with_retry, open_store, ConnectError};
pub use adapters::http::{create_router, serve};
pub use adapters::storage::{FileNumberStore, InMemoryNumberStore};
#[cfg(feature = "rocksdb")]
pub use adapters::storage::RocksDbNumberStore;
pub use domain::config::{ConfigError, HttpConfig, RetryPolicy, StoreLocation, ValidatorConfig};
pub use domain::entities::AcceptedNumber;
pub use domain::errors::{SequenceError, StoreError};
pub use ports::inbound::SequenceValidatorApi;
pub use ports::outbound::NumberStore;
pub use service::SequenceValidatorService;

/// Crate version, reported by `GET /`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Human-readable service title used in the root banner.
pub const SERVICE_TITLE: &str = "Application Server";
