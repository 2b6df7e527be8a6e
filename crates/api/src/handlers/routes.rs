use axum::{
	extract::{rejection::QueryRejection, Query, State},
	response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use xroute_service::{RouteTokens, RouteVerdict};
use xroute_types::RouteKey;

use crate::handlers::common::{bad_request, require_param, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
	#[serde(default)]
	pub src_chain_key: String,
	#[serde(default)]
	pub src_token: String,
	#[serde(default)]
	pub dst_chain_key: String,
	#[serde(default)]
	pub dst_token: String,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
	pub available: bool,
	pub verdict: RouteVerdict,
}

/// GET /api/v1/routes/availability
pub async fn get_route_availability(
	State(state): State<AppState>,
	query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
	let Query(query) = query.map_err(|e| bad_request("VALIDATION_ERROR", e.body_text()))?;
	let route = RouteKey::new(
		require_param("srcChainKey", &query.src_chain_key)?,
		require_param("srcToken", &query.src_token)?,
		require_param("dstChainKey", &query.dst_chain_key)?,
		require_param("dstToken", &query.dst_token)?,
	);

	let verdict = state.bridge_service.check_route(&route).await;
	info!("Availability for {}: {:?}", route, verdict);
	Ok(Json(AvailabilityResponse {
		available: verdict.is_available(),
		verdict,
	}))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainPairQuery {
	#[serde(default)]
	pub src_chain_key: String,
	#[serde(default)]
	pub dst_chain_key: String,
}

/// GET /api/v1/routes/tokens
pub async fn get_route_tokens(
	State(state): State<AppState>,
	query: Result<Query<ChainPairQuery>, QueryRejection>,
) -> Result<Json<RouteTokens>, ApiError> {
	let Query(query) = query.map_err(|e| bad_request("VALIDATION_ERROR", e.body_text()))?;
	let src_chain_key = require_param("srcChainKey", &query.src_chain_key)?;
	let dst_chain_key = require_param("dstChainKey", &query.dst_chain_key)?;

	let routes = state
		.bridge_service
		.supported_tokens_between(src_chain_key, dst_chain_key)
		.await;
	Ok(Json(routes))
}
