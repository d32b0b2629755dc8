//! Adapters for the web gateway.

pub mod app_server;

pub use app_server::HttpApplicationServer;
