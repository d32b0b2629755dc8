//! # NS Telemetry
//!
//! Structured logging for both tiers of the number-sequence relay.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ns_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::for_service("web-server"))?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `NS_JSON_LOGS` | `false` (`true` in containers) | JSON formatted output |
//! | `NS_CONSOLE_OUTPUT` | `true` | Emit logs to stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("Failed to install global subscriber: {0}")]
    Install(String),
}

/// Initialize structured logging for a service.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::init_logging(&config)?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active for the process lifetime.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}

/// Log an event about a submitted number with the standard fields.
///
/// # Example
///
/// ```rust,ignore
/// log_number_event!(warn, "application-server", "Duplicate number", 7, code = "DUPLICATE_NUMBER");
/// ```
#[macro_export]
macro_rules! log_number_event {
    ($level:ident, $service:expr, $msg:expr, $number:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            service = $service,
            number = $number,
            $($($field)*,)?
            $msg
        )
    };
}
