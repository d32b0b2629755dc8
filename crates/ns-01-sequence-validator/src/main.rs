//! # Application Server
//!
//! Entry point for the sequence validator.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry
//! 2. Load and validate configuration from the environment
//! 3. Acquire the store (bounded retry)
//! 4. Serve HTTP until Ctrl-C / SIGTERM
//! 5. Close the store

use std::sync::Arc;

use anyhow::{Context, Result};
use ns_01_sequence_validator::{
    connect_with_retry, create_router, serve, SequenceValidatorService, ValidatorConfig,
};
use ns_telemetry::{init_telemetry, TelemetryConfig};
use shared_types::APPLICATION_SERVER;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::for_service(APPLICATION_SERVER))
        .context("Failed to initialize telemetry")?;

    let config = ValidatorConfig::from_env().context("Invalid application server configuration")?;
    info!(
        addr = %config.http_addr(),
        store = %config.store,
        max_attempts = config.retry.max_attempts,
        "Starting application server"
    );

    let store = connect_with_retry(&config.store, &config.retry)
        .await
        .context("Failed to connect to store")?;

    let service = SequenceValidatorService::new(Arc::clone(&store));
    let router = create_router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(config.http_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.http_addr()))?;

    serve(listener, router, shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server drained, closing store");
    if let Err(e) = store.close() {
        error!(error = %e, "Failed to close store cleanly");
    }

    info!("Application server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
