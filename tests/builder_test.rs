//! BridgeBuilder wiring tests

mod mocks;

use std::sync::Arc;

use mocks::fake_stargate::{Behavior, FakeStargate};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use xroute::mocks::MockAggregator;
use xroute::{BridgeBuilder, BridgeServiceTrait, DataSource, Settings};

async fn serve(app: axum::Router) -> (String, tokio::task::JoinHandle<()>) {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	let handle = tokio::spawn(async move {
		let _ = axum::serve(listener, app).await;
	});
	(format!("http://{}:{}", addr.ip(), addr.port()), handle)
}

fn settings_for(server: &FakeStargate) -> Settings {
	let mut settings = Settings::default();
	settings.aggregator.base_url = server.base_url.clone();
	settings.aggregator.timeout_ms = 2_000;
	settings
}

#[tokio::test]
async fn test_builder_with_custom_client() {
	let aggregator = Arc::new(MockAggregator::new());
	let (_router, state) = BridgeBuilder::new()
		.with_client(aggregator.clone())
		.start()
		.await
		.unwrap();

	assert_eq!(state.bridge_service.chain_source().await, DataSource::Static);
	assert_eq!(aggregator.chain_calls(), 1);
}

#[tokio::test]
async fn test_builder_rejects_invalid_settings() {
	let mut settings = Settings::default();
	settings.aggregator.timeout_ms = 0;

	let result = BridgeBuilder::new()
		.with_settings(settings)
		.with_client(Arc::new(MockAggregator::new()))
		.start()
		.await;
	assert!(result.is_err());
}

#[tokio::test]
async fn test_builder_rejects_bad_aggregator_url() {
	let mut settings = Settings::default();
	settings.aggregator.base_url = "not a url".to_string();

	let result = BridgeBuilder::new().with_settings(settings).start().await;
	assert!(result.is_err());
}

#[tokio::test]
async fn test_builder_keeps_provided_settings() {
	let mut settings = Settings::default();
	settings.server.port = 4455;

	let builder = BridgeBuilder::new().with_settings(settings);
	assert_eq!(builder.settings().map(|s| s.server.port), Some(4455));
}

#[tokio::test]
async fn test_stargate_stack_end_to_end() {
	let stargate = FakeStargate::spawn().await;
	let (app, _state) = BridgeBuilder::new()
		.with_settings(settings_for(&stargate))
		.start()
		.await
		.unwrap();
	let (base_url, handle) = serve(app).await;
	let client = Client::new();

	let chains: Value = client
		.get(format!("{}/api/v1/chains", base_url))
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	assert_eq!(chains["source"], "live");
	assert_eq!(chains["chains"].as_array().unwrap().len(), 2);

	let response = client
		.post(format!("{}/api/v1/quotes", base_url))
		.json(&json!({
			"srcChainKey": "ethereum",
			"srcToken": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
			"dstChainKey": "arbitrum",
			"dstToken": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
			"amount": "1.5",
			"srcDecimals": 6,
			"dstDecimals": 6,
			"srcAddress": "0x1111111111111111111111111111111111111111",
			"dstAddress": "0x1111111111111111111111111111111111111111"
		}))
		.send()
		.await
		.unwrap();
	assert_eq!(response.status(), StatusCode::OK);
	let quotes: Value = response.json().await.unwrap();

	assert_eq!(quotes["totalQuotes"], 2);
	assert_eq!(quotes["best"]["routeLabel"], "stargate/v2/taxi");
	assert_eq!(quotes["quotes"][0]["dstAmountMin"], "1482550");

	// The token index confirmed the route, so only the real request hit the quotes endpoint
	assert_eq!(stargate.quote_calls(), 1);
	assert_eq!(
		stargate.last_query().get("dstAmountMin").map(String::as_str),
		Some("1492500")
	);

	handle.abort();
	stargate.abort();
}

#[tokio::test]
async fn test_stargate_outage_degrades_to_static_catalog() {
	let stargate = FakeStargate::spawn().await;
	stargate.set_chains(Behavior::Status(503));
	stargate.set_tokens(Behavior::Status(503));

	let (app, _state) = BridgeBuilder::new()
		.with_settings(settings_for(&stargate))
		.start()
		.await
		.unwrap();
	let (base_url, handle) = serve(app).await;
	let client = Client::new();

	let ready: Value = client
		.get(format!("{}/ready", base_url))
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	assert_eq!(ready["status"], "degraded");

	let routes: Value = client
		.get(format!(
			"{}/api/v1/routes/tokens?srcChainKey=ethereum&dstChainKey=base",
			base_url
		))
		.send()
		.await
		.unwrap()
		.json()
		.await
		.unwrap();
	assert_eq!(routes["source"], "static");
	assert!(!routes["routes"].as_array().unwrap().is_empty());

	handle.abort();
	stargate.abort();
}

#[tokio::test]
async fn test_unusable_stargate_quotes_are_not_remembered() {
	let stargate = FakeStargate::spawn().await;
	stargate.set_tokens(Behavior::Json(json!({ "tokens": [] })));
	stargate.set_quotes(Behavior::Json(json!({
		"quotes": [
			{
				"route": "stargate/v2/taxi",
				"error": { "message": "insufficient liquidity" },
				"srcAmount": "1000000",
				"dstAmount": "0",
				"fees": [],
				"steps": []
			}
		]
	})));

	let (app, _state) = BridgeBuilder::new()
		.with_settings(settings_for(&stargate))
		.start()
		.await
		.unwrap();
	let (base_url, handle) = serve(app).await;
	let client = Client::new();
	let path = format!(
		"{}/api/v1/routes/availability?srcChainKey=ethereum&srcToken={}&dstChainKey=arbitrum&dstToken={}",
		base_url,
		"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
		"0xaf88d065e77c8cC2239327C5EDb3A432268e5831"
	);

	let first: Value = client.get(&path).send().await.unwrap().json().await.unwrap();
	assert_eq!(first["verdict"]["kind"], "providerData");

	// Once Stargate recovers the next check asks again instead of answering from cache
	stargate.set_quotes(Behavior::Fixture);
	let second: Value = client.get(&path).send().await.unwrap().json().await.unwrap();
	assert_eq!(second["available"], true);
	assert_eq!(second["verdict"]["kind"], "probe");
	assert_eq!(second["verdict"]["quotes"], 2);
	assert_eq!(stargate.quote_calls(), 2);

	handle.abort();
	stargate.abort();
}
