//! Outbound ports for the web gateway.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// An application server response, kept byte-for-byte for passthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RelayedResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Transport-level failures talking to the application server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("cannot connect to application server: {0}")]
    Unreachable(String),

    #[error("application server timed out")]
    Timeout,

    #[error("application server transport error: {0}")]
    Transport(String),
}

impl RelayError {
    /// Whether the caller should see 503.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RelayError::Unreachable(_) | RelayError::Timeout)
    }
}

/// The application server as seen from the gateway.
///
/// Production: `HttpApplicationServer`. Tests substitute in-process fakes.
#[async_trait]
pub trait ApplicationServer: Send + Sync {
    /// `POST /process` with `{ "number": number }`.
    async fn process(&self, number: i64) -> Result<RelayedResponse, RelayError>;

    /// `GET /numbers`.
    async fn numbers(&self) -> Result<RelayedResponse, RelayError>;

    /// `GET /health`, returning only the status code.
    async fn health(&self) -> Result<u16, RelayError>;
}
