//! Adapters for the sequence validator.
//!
//! Infrastructure implementations: storage backends, startup connection and
//! the HTTP surface.

pub mod connect;
pub mod http;
pub mod storage;
