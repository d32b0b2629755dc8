//! # Health Payloads
//!
//! `GET /health` bodies for both tiers.

use serde::{Deserialize, Serialize};

use crate::{APPLICATION_SERVER, WEB_SERVER};

/// Overall status of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Store connectivity as seen by the application server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

/// Application-server status as seen by the gateway health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppServerStatus {
    /// Health check answered 200.
    Healthy,
    /// Health check answered with any other status.
    Unhealthy,
    /// Health check failed at the transport level.
    Unreachable,
}

/// Application server `GET /health` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorHealth {
    pub status: HealthStatus,
    pub service: String,
    pub database: DatabaseStatus,
}

impl ValidatorHealth {
    pub fn from_database(database: DatabaseStatus) -> Self {
        let status = match database {
            DatabaseStatus::Connected => HealthStatus::Healthy,
            DatabaseStatus::Disconnected => HealthStatus::Unhealthy,
        };
        Self {
            status,
            service: APPLICATION_SERVER.to_string(),
            database,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Web gateway `GET /health` body.
///
/// The gateway reports itself healthy regardless of the upstream; the
/// upstream state is carried separately in `app_server`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayHealth {
    pub status: HealthStatus,
    pub service: String,
    pub app_server: AppServerStatus,
}

impl GatewayHealth {
    pub fn with_app_server(app_server: AppServerStatus) -> Self {
        Self {
            status: HealthStatus::Healthy,
            service: WEB_SERVER.to_string(),
            app_server,
        }
    }
}
