use axum::{extract::State, response::Json};
use serde::Serialize;
use xroute_service::DataSource;

use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
	"OK"
}

/// Readiness response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
	pub status: String,
	pub chain_source: DataSource,
}

/// GET /ready - Ready once a chain source is settled; the static catalogue counts
pub async fn ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
	let chain_source = state.bridge_service.chain_source().await;
	let status = match chain_source {
		DataSource::Live => "ready",
		DataSource::Static => "degraded",
	};
	Json(ReadinessResponse {
		status: status.to_string(),
		chain_source,
	})
}
