//! # HTTP Adapter
//!
//! Axum surface of the application server.
//!
//! | Method/Path     | Operation                         |
//! |-----------------|-----------------------------------|
//! | `POST /process` | `SequenceValidatorApi::process`   |
//! | `GET /numbers`  | `SequenceValidatorApi::list_numbers` |
//! | `GET /health`   | `SequenceValidatorApi::health`    |
//! | `GET /`         | service banner                    |
//!
//! Store calls are synchronous and may fsync, so they run on the blocking pool.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use shared_types::{
    DatabaseStatus, NumbersResponse, ProcessRequest, ProcessResponse, ServiceInfo, ValidatorHealth,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::errors::{SequenceError, INTERNAL_ERROR_MESSAGE};
use crate::ports::inbound::SequenceValidatorApi;
use crate::{SERVICE_TITLE, VERSION};

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    validator: Arc<dyn SequenceValidatorApi>,
}

impl IntoResponse for SequenceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}

/// Build the application server router.
pub fn create_router(validator: Arc<dyn SequenceValidatorApi>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/process", post(process_number))
        .route("/numbers", get(list_numbers))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { validator })
}

/// Serve `router` on `listener` until `shutdown` resolves, then drain.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Application server listening");
    }
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Run a validator call on the blocking pool.
async fn run_blocking<T, F>(state: &AppState, op: F) -> Result<T, SequenceError>
where
    T: Send + 'static,
    F: FnOnce(&dyn SequenceValidatorApi) -> Result<T, SequenceError> + Send + 'static,
{
    let validator = Arc::clone(&state.validator);
    tokio::task::spawn_blocking(move || op(validator.as_ref()))
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "Validator task failed");
            Err(SequenceError::Unexpected {
                message: INTERNAL_ERROR_MESSAGE,
                reason: e.to_string(),
            })
        })
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::running(SERVICE_TITLE, VERSION))
}

async fn process_number(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, SequenceError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Malformed process request");
        SequenceError::MalformedRequest {
            reason: rejection.body_text(),
        }
    })?;

    let accepted = run_blocking(&state, move |v| v.process(request.number)).await?;
    Ok(Json(accepted.into()))
}

async fn list_numbers(
    State(state): State<AppState>,
) -> Result<Json<NumbersResponse>, SequenceError> {
    let processed_numbers = run_blocking(&state, |v| v.list_numbers()).await?;
    Ok(Json(NumbersResponse { processed_numbers }))
}

async fn health_check(State(state): State<AppState>) -> Response {
    let health = run_blocking(&state, |v| Ok(v.health()))
        .await
        .unwrap_or_else(|_| ValidatorHealth::from_database(DatabaseStatus::Disconnected));
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health)).into_response()
}
