//! # Number-Sequence Relay Test Suite
//!
//! Cross-tier scenarios: a real web gateway in front of a real application
//! server, both bound to loopback ports.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Spawns both tiers on 127.0.0.1:0
//! └── integration/      # End-to-end flows through the gateway
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ns-tests
//! ```

pub mod harness;
pub mod integration;
