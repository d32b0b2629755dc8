//! # Web Server
//!
//! Entry point for the web gateway.

use std::sync::Arc;

use anyhow::{Context, Result};
use ns_02_web_gateway::{create_router, serve, GatewayConfig, GatewayService, HttpApplicationServer};
use ns_telemetry::{init_telemetry, TelemetryConfig};
use shared_types::WEB_SERVER;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::for_service(WEB_SERVER))
        .context("Failed to initialize telemetry")?;

    let config = GatewayConfig::from_env().context("Invalid web server configuration")?;
    info!(
        addr = %config.http_addr(),
        app_server = %config.upstream.base_url,
        "Starting web server"
    );

    let upstream = HttpApplicationServer::new(&config.upstream)
        .context("Failed to build application server client")?;
    let router = create_router(GatewayService::new(Arc::new(upstream)));

    let listener = tokio::net::TcpListener::bind(config.http_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.http_addr()))?;

    serve(listener, router, shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Web server stopped");
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
