//! # Gateway Service
//!
//! Structural validation plus relay. The gateway never decides whether a
//! number fits the sequence; every application server answer is passed on
//! unchanged.

use std::sync::Arc;

use ns_telemetry::log_number_event;
use shared_types::{AppServerStatus, GatewayHealth, WEB_SERVER};
use tracing::{error, warn};

use crate::domain::error::GatewayError;
use crate::domain::validation::validate_payload;
use crate::ports::outbound::{ApplicationServer, RelayError, RelayedResponse};

/// Web gateway service
#[derive(Clone)]
pub struct GatewayService {
    upstream: Arc<dyn ApplicationServer>,
}

impl GatewayService {
    pub fn new(upstream: Arc<dyn ApplicationServer>) -> Self {
        Self { upstream }
    }

    /// Validate a raw `/process` body and relay it.
    pub async fn submit(&self, body: &[u8]) -> Result<RelayedResponse, GatewayError> {
        let number = validate_payload(body).inspect_err(|e| {
            warn!(error = %e, "Validation error");
        })?;

        let relayed = self
            .upstream
            .process(number)
            .await
            .map_err(upstream_failure)?;

        log_number_event!(
            info,
            WEB_SERVER,
            "Relayed number",
            number,
            status = relayed.status
        );
        Ok(relayed)
    }

    /// Relay `GET /numbers`. Only a 200 answer is passed through.
    pub async fn list_numbers(&self) -> Result<RelayedResponse, GatewayError> {
        let relayed = self.upstream.numbers().await.map_err(upstream_failure)?;
        if !relayed.is_success() {
            error!(status = relayed.status, "Application server failed to list numbers");
            return Err(GatewayError::NumbersUnavailable {
                status: relayed.status,
            });
        }
        Ok(relayed)
    }

    /// Gateway health. Always healthy itself; reports the upstream's state.
    pub async fn health(&self) -> GatewayHealth {
        let app_server = match self.upstream.health().await {
            Ok(200) => AppServerStatus::Healthy,
            Ok(status) => {
                warn!(status, "Application server reports unhealthy");
                AppServerStatus::Unhealthy
            }
            Err(e) => {
                warn!(error = %e, "Application server unreachable");
                AppServerStatus::Unreachable
            }
        };
        GatewayHealth::with_app_server(app_server)
    }
}

fn upstream_failure(e: RelayError) -> GatewayError {
    if e.is_unavailable() {
        GatewayError::ServiceUnavailable
    } else {
        GatewayError::Internal {
            reason: e.to_string(),
        }
    }
}
