//! HTTP surface of the web gateway.

use std::future::Future;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared_types::GatewayHealth;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::error::{GatewayError, UNREADABLE_BODY};
use crate::ports::outbound::RelayedResponse;
use crate::service::GatewayService;

/// Build the gateway router.
pub fn create_router(service: GatewayService) -> Router {
    Router::new()
        .route("/process", post(process_number))
        .route("/numbers", get(get_numbers))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve `router` on `listener` until `shutdown` resolves, then drain.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Web server listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn process_number(
    State(service): State<GatewayService>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, GatewayError> {
    let body = body.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Unreadable request body");
        GatewayError::BadRequest(UNREADABLE_BODY)
    })?;
    service.submit(&body).await.map(passthrough)
}

async fn get_numbers(State(service): State<GatewayService>) -> Result<Response, GatewayError> {
    service.list_numbers().await.map(passthrough)
}

async fn health_check(State(service): State<GatewayService>) -> Json<GatewayHealth> {
    Json(service.health().await)
}

/// Rebuild the application server's answer without touching the body.
fn passthrough(relayed: RelayedResponse) -> Response {
    let status = match StatusCode::from_u16(relayed.status) {
        Ok(status) => status,
        Err(e) => {
            error!(status = relayed.status, error = %e, "Application server sent invalid status");
            return GatewayError::Internal {
                reason: e.to_string(),
            }
            .into_response();
        }
    };

    let mut response = Response::new(Body::from(relayed.body));
    *response.status_mut() = status;
    if let Some(value) = relayed
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok())
    {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }
    response
}
