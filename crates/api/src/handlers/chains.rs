use axum::{
	extract::{rejection::QueryRejection, Query, State},
	http::StatusCode,
	response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use xroute_service::ChainListing;
use xroute_types::TokenDescriptor;

use crate::handlers::common::{bad_request, error_response, require_param, ApiError};
use crate::state::AppState;

/// GET /api/v1/chains
pub async fn get_chains(State(state): State<AppState>) -> Json<ChainListing> {
	let listing = state.bridge_service.list_chains().await;
	debug!("Listing {} chains ({:?})", listing.chains.len(), listing.source);
	Json(listing)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensQuery {
	#[serde(default)]
	pub chain_key: String,
}

#[derive(Debug, Serialize)]
pub struct TokensResponse {
	pub tokens: Vec<TokenDescriptor>,
}

/// GET /api/v1/tokens?chainKey=
pub async fn get_tokens(
	State(state): State<AppState>,
	query: Result<Query<TokensQuery>, QueryRejection>,
) -> Result<Json<TokensResponse>, ApiError> {
	let Query(query) = query.map_err(|e| bad_request("VALIDATION_ERROR", e.body_text()))?;
	let chain_key = require_param("chainKey", &query.chain_key)?;

	let tokens = state.bridge_service.tokens(chain_key).await;
	Ok(Json(TokensResponse { tokens }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTokenQuery {
	#[serde(default)]
	pub chain_key: String,
	#[serde(default)]
	pub symbol: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveTokenResponse {
	pub chain_key: String,
	pub symbol: String,
	pub address: String,
}

/// GET /api/v1/tokens/resolve?chainKey=&symbol=
pub async fn resolve_token(
	State(state): State<AppState>,
	query: Result<Query<ResolveTokenQuery>, QueryRejection>,
) -> Result<Json<ResolveTokenResponse>, ApiError> {
	let Query(query) = query.map_err(|e| bad_request("VALIDATION_ERROR", e.body_text()))?;
	let chain_key = require_param("chainKey", &query.chain_key)?;
	let symbol = require_param("symbol", &query.symbol)?;

	match state
		.bridge_service
		.resolve_token_address(chain_key, symbol)
		.await
	{
		Some(address) => Ok(Json(ResolveTokenResponse {
			chain_key: chain_key.to_string(),
			symbol: symbol.to_string(),
			address,
		})),
		None => Err(error_response(
			StatusCode::NOT_FOUND,
			"TOKEN_NOT_FOUND",
			format!("No token {} on chain {}", symbol, chain_key),
		)),
	}
}
