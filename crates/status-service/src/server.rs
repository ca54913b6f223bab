//! HTTP API for the status orchestrator.

use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::{IntoResponse, Json, Response},
	routing::{get, post},
	Router,
};
use status_core::StatusOrchestrator;
use status_types::{ChainInfo, ErrorClass, ErrorResponse, StatusError, StatusRequest, StatusResponse};
use std::future::Future;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
	orchestrator: Arc<StatusOrchestrator>,
}

pub fn router(orchestrator: Arc<StatusOrchestrator>) -> Router {
	Router::new()
		.route("/health", get(health_check))
		.route("/api/chains", get(list_chains))
		.route("/api/sodax-status", post(sodax_status))
		.with_state(AppState { orchestrator })
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
}

/// Serves `router` on `host:port` until `shutdown` resolves.
pub async fn serve<F>(router: Router, host: &str, port: u16, shutdown: F) -> anyhow::Result<()>
where
	F: Future<Output = ()> + Send + 'static,
{
	let listener = tokio::net::TcpListener::bind((host, port)).await?;

	info!("API server listening on {}", listener.local_addr()?);

	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown)
		.await?;

	Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
	Json(serde_json::json!({
		"status": "ok",
		"timestamp": chrono::Utc::now().timestamp()
	}))
}

async fn list_chains(State(state): State<AppState>) -> Json<Vec<ChainInfo>> {
	Json(state.orchestrator.chains())
}

async fn sodax_status(
	State(state): State<AppState>,
	payload: Result<Json<StatusRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
	let Json(request) = payload.map_err(|e| ApiError::InvalidBody(e.body_text()))?;

	let request_id = Uuid::new_v4();
	state
		.orchestrator
		.check_status(&request)
		.instrument(info_span!("sodax_status", %request_id))
		.await
		.map(Json)
		.map_err(ApiError::Status)
}

/// Failure of a status request, rendered as `{ "error": ... }`.
#[derive(Debug)]
enum ApiError {
	InvalidBody(String),
	Status(StatusError),
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let (status, message) = match self {
			ApiError::InvalidBody(message) => {
				warn!("Rejected request body: {}", message);
				(StatusCode::BAD_REQUEST, message)
			}
			ApiError::Status(e) => match e.class() {
				ErrorClass::Validation => (StatusCode::BAD_REQUEST, e.to_string()),
				// Pending callers always see the same message, whatever the cause.
				ErrorClass::Pending => (
					StatusCode::NOT_FOUND,
					StatusError::VerificationPending.to_string(),
				),
				ErrorClass::Downstream => {
					error!("Status request failed: {}", e);
					(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
				}
			},
		};

		(status, Json(ErrorResponse::new(message))).into_response()
	}
}
