use axum::{
	routing::{get, post},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{
	get_chains, get_route_availability, get_route_tokens, get_tokens, health, post_quotes, ready,
	resolve_token,
};
use crate::security::add_security_headers;
use crate::state::AppState;

/// Quote requests are small; anything larger is rejected before parsing
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(MAX_BODY_BYTES);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::DEBUG))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let router = Router::new()
		.route("/health", get(health))
		.route("/ready", get(ready))
		.route("/api/v1/chains", get(get_chains))
		.route("/api/v1/tokens", get(get_tokens))
		.route("/api/v1/tokens/resolve", get(resolve_token))
		.route("/api/v1/routes/availability", get(get_route_availability))
		.route("/api/v1/routes/tokens", get(get_route_tokens))
		.route("/api/v1/quotes", post(post_quotes))
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use axum::{
		body::{to_bytes, Body},
		http::{Request, StatusCode},
	};
	use serde_json::{json, Value};
	use std::sync::Arc;
	use tower::ServiceExt;
	use xroute_service::{
		BridgeServiceTrait, ChainListing, DataSource, QuoteSelection, RouteTokens, RouteVerdict,
	};
	use xroute_types::{
		Amount, ChainDescriptor, NativeCurrency, Quote, QuoteParams, RankingPolicy, RouteKey,
		TokenDescriptor,
	};

	mockall::mock! {
		pub Bridge {}

		#[async_trait]
		impl BridgeServiceTrait for Bridge {
			async fn list_chains(&self) -> ChainListing;
			async fn tokens(&self, chain_key: &str) -> Vec<TokenDescriptor>;
			async fn resolve_token_address(&self, chain_key: &str, symbol: &str) -> Option<String>;
			async fn check_route(&self, route: &RouteKey) -> RouteVerdict;
			async fn supported_tokens_between(&self, src_chain_key: &str, dst_chain_key: &str) -> RouteTokens;
			async fn get_quotes(&self, params: &QuoteParams) -> Vec<Quote>;
			async fn quote(&self, params: &QuoteParams, policy: Option<RankingPolicy>) -> QuoteSelection;
			async fn chain_source(&self) -> DataSource;
		}
	}

	fn app(bridge: MockBridge) -> Router {
		create_router().with_state(AppState::new(Arc::new(bridge)))
	}

	async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
		let response = app.oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
		(status, body)
	}

	fn get(uri: &str) -> Request<Body> {
		Request::builder().uri(uri).body(Body::empty()).unwrap()
	}

	fn post_json(uri: &str, body: Value) -> Request<Body> {
		Request::builder()
			.method("POST")
			.uri(uri)
			.header("content-type", "application/json")
			.body(Body::from(body.to_string()))
			.unwrap()
	}

	fn sample_quote(label: &str, duration: u64) -> Quote {
		Quote {
			route_label: label.to_string(),
			src_amount: Amount::from(1_000_000u64),
			dst_amount: Amount::from(999_000u64),
			dst_amount_min: Amount::from(994_005u64),
			estimated_duration_seconds: duration,
			fees: Vec::new(),
			steps: Vec::new(),
		}
	}

	fn quote_body() -> Value {
		json!({
			"srcChainKey": "ethereum",
			"srcToken": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
			"dstChainKey": "arbitrum",
			"dstToken": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
			"amount": "1",
			"srcDecimals": 6,
			"dstDecimals": 6,
			"slippage": "0.005",
			"srcAddress": "0x1111111111111111111111111111111111111111",
			"dstAddress": "0x1111111111111111111111111111111111111111"
		})
	}

	#[tokio::test]
	async fn test_health_and_security_headers() {
		let response = app(MockBridge::new()).oneshot(get("/health")).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.headers()["x-content-type-options"], "nosniff");
		assert!(response.headers().contains_key("x-request-id"));
	}

	#[tokio::test]
	async fn test_chains_listing() {
		let mut bridge = MockBridge::new();
		bridge.expect_list_chains().returning(|| ChainListing {
			chains: vec![ChainDescriptor::new(
				"ethereum",
				1,
				"Ethereum",
				NativeCurrency::new("ETH", 18),
			)],
			source: DataSource::Static,
		});

		let (status, body) = send(app(bridge), get("/api/v1/chains")).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["source"], "static");
		assert_eq!(body["chains"][0]["chainId"], 1);
	}

	#[tokio::test]
	async fn test_tokens_requires_chain_key() {
		let mut bridge = MockBridge::new();
		bridge.expect_tokens().never();

		let (status, body) = send(app(bridge), get("/api/v1/tokens")).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["error"], "VALIDATION_ERROR");
		assert!(body["timestamp"].is_i64());
	}

	#[tokio::test]
	async fn test_resolve_unknown_token_is_not_found() {
		let mut bridge = MockBridge::new();
		bridge
			.expect_resolve_token_address()
			.withf(|chain, symbol| chain.to_string() == "base" && symbol.to_string() == "XYZ")
			.returning(|_, _| None);

		let (status, body) =
			send(app(bridge), get("/api/v1/tokens/resolve?chainKey=base&symbol=XYZ")).await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body["error"], "TOKEN_NOT_FOUND");
	}

	#[tokio::test]
	async fn test_route_availability() {
		let mut bridge = MockBridge::new();
		bridge
			.expect_check_route()
			.withf(|route| route.src_chain_key == "ethereum" && route.dst_chain_key == "arbitrum")
			.returning(|_| RouteVerdict::Unsupported);

		let uri = "/api/v1/routes/availability?srcChainKey=ethereum&srcToken=0xA&dstChainKey=arbitrum&dstToken=0xB";
		let (status, body) = send(app(bridge), get(uri)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["available"], false);
		assert_eq!(body["verdict"]["kind"], "unsupported");
	}

	#[tokio::test]
	async fn test_route_tokens() {
		let mut bridge = MockBridge::new();
		bridge
			.expect_supported_tokens_between()
			.returning(|_, _| RouteTokens {
				routes: Vec::new(),
				source: DataSource::Live,
			});

		let (status, body) = send(
			app(bridge),
			get("/api/v1/routes/tokens?srcChainKey=ethereum&dstChainKey=base"),
		)
		.await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["source"], "live");

		let (status, _) = send(
			app(MockBridge::new()),
			get("/api/v1/routes/tokens?srcChainKey=ethereum"),
		)
		.await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_post_quotes_with_policy() {
		let mut bridge = MockBridge::new();
		bridge
			.expect_quote()
			.withf(|params, policy| {
				params.amount == "1" && *policy == Some(RankingPolicy::Cheapest)
			})
			.times(1)
			.returning(|_, policy| QuoteSelection {
				quotes: vec![sample_quote("bus", 600), sample_quote("taxi", 180)],
				best: Some(sample_quote("bus", 600)),
				policy: policy.unwrap_or_default(),
			});

		let mut body = quote_body();
		body["policy"] = json!("Cheapest");
		let (status, body) = send(app(bridge), post_json("/api/v1/quotes", body)).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["totalQuotes"], 2);
		assert_eq!(body["best"]["routeLabel"], "bus");
		assert_eq!(body["best"]["dstAmountMin"], "994005");
		assert_eq!(body["policy"], "cheapest");
	}

	#[tokio::test]
	async fn test_post_quotes_empty_is_ok() {
		let mut bridge = MockBridge::new();
		bridge.expect_quote().returning(|_, _| QuoteSelection {
			quotes: Vec::new(),
			best: None,
			policy: RankingPolicy::Fastest,
		});

		let (status, body) = send(app(bridge), post_json("/api/v1/quotes", quote_body())).await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["totalQuotes"], 0);
		assert!(body["best"].is_null());
	}

	#[tokio::test]
	async fn test_post_quotes_rejects_bad_input() {
		let mut bridge = MockBridge::new();
		bridge.expect_quote().never();
		let mut body = quote_body();
		body["policy"] = json!("lowest");
		let (status, response) = send(app(bridge), post_json("/api/v1/quotes", body)).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(response["error"], "INVALID_POLICY");

		let request = Request::builder()
			.method("POST")
			.uri("/api/v1/quotes")
			.header("content-type", "application/json")
			.body(Body::from("{not json"))
			.unwrap();
		let (status, response) = send(app(MockBridge::new()), request).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(response["error"], "VALIDATION_ERROR");
	}
}
