use axum::{
	extract::{rejection::JsonRejection, State},
	response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use xroute_types::{Quote, QuoteParams, RankingPolicy};

use crate::handlers::common::{bad_request, ApiError};
use crate::state::AppState;

/// Quote parameters plus an optional ranking policy
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
	#[serde(flatten)]
	pub params: QuoteParams,
	#[serde(default)]
	pub policy: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotesResponse {
	pub quotes: Vec<Quote>,
	pub best: Option<Quote>,
	pub policy: RankingPolicy,
	pub total_quotes: usize,
}

/// POST /api/v1/quotes - Quotes in provider order plus the best one under the policy
///
/// An unavailable route or a failed aggregator call is not an error here: the response
/// is a 200 with an empty list.
pub async fn post_quotes(
	State(state): State<AppState>,
	payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuotesResponse>, ApiError> {
	let Json(request) = payload.map_err(|e| {
		bad_request(
			"VALIDATION_ERROR",
			format!("Invalid request: {}", e.body_text()),
		)
	})?;

	let policy = request
		.policy
		.as_deref()
		.map(str::parse::<RankingPolicy>)
		.transpose()
		.map_err(|e| bad_request("INVALID_POLICY", e.to_string()))?;

	info!(
		"Received quotes request for {} (policy: {})",
		request.params.route_key(),
		policy.map_or_else(|| "default".to_string(), |p| p.to_string())
	);

	let selection = state.bridge_service.quote(&request.params, policy).await;
	let total_quotes = selection.quotes.len();

	info!("Returning {} quotes", total_quotes);
	Ok(Json(QuotesResponse {
		quotes: selection.quotes,
		best: selection.best,
		policy: selection.policy,
		total_quotes,
	}))
}
