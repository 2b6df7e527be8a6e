//! Fake Stargate REST server
//!
//! Serves fixture bodies on 127.0.0.1 so the real reqwest client runs against status
//! codes, slow responses and malformed bodies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
	extract::{Query, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::get,
	Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// How an endpoint answers
#[derive(Debug, Clone)]
pub enum Behavior {
	Fixture,
	Status(u16),
	Delay(Duration),
	Garbage,
	Json(Value),
}

#[derive(Default)]
struct FakeState {
	chains: Mutex<Option<Behavior>>,
	tokens: Mutex<Option<Behavior>>,
	quotes: Mutex<Option<Behavior>>,
	last_query: Mutex<HashMap<String, String>>,
	last_api_key: Mutex<Option<String>>,
	quote_calls: AtomicUsize,
}

pub struct FakeStargate {
	pub base_url: String,
	state: Arc<FakeState>,
	handle: JoinHandle<()>,
}

impl FakeStargate {
	pub async fn spawn() -> Self {
		let state = Arc::new(FakeState::default());
		let app = Router::new()
			.route("/api/v1/chains", get(chains))
			.route("/api/v1/tokens", get(tokens))
			.route("/api/v1/quotes", get(quotes))
			.with_state(Arc::clone(&state));

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind fake stargate port");
		let addr = listener.local_addr().unwrap();
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Self {
			base_url: format!("http://{}:{}/api/v1", addr.ip(), addr.port()),
			state,
			handle,
		}
	}

	pub fn set_chains(&self, behavior: Behavior) {
		*self.state.chains.lock().unwrap() = Some(behavior);
	}

	pub fn set_tokens(&self, behavior: Behavior) {
		*self.state.tokens.lock().unwrap() = Some(behavior);
	}

	pub fn set_quotes(&self, behavior: Behavior) {
		*self.state.quotes.lock().unwrap() = Some(behavior);
	}

	pub fn last_query(&self) -> HashMap<String, String> {
		self.state.last_query.lock().unwrap().clone()
	}

	pub fn last_api_key(&self) -> Option<String> {
		self.state.last_api_key.lock().unwrap().clone()
	}

	pub fn quote_calls(&self) -> usize {
		self.state.quote_calls.load(Ordering::SeqCst)
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}

pub fn chains_fixture() -> Value {
	json!({
		"chains": [
			{
				"chainKey": "ethereum",
				"chainType": "EVM",
				"chainId": 1,
				"shortName": "Ethereum",
				"name": "Ethereum",
				"nativeCurrency": {
					"chainKey": "ethereum",
					"name": "ETH",
					"symbol": "ETH",
					"decimals": 18,
					"address": "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE"
				}
			},
			{
				"chainKey": "arbitrum",
				"chainType": "EVM",
				"chainId": 42161,
				"shortName": "Arbitrum",
				"nativeCurrency": {
					"symbol": "ETH",
					"decimals": 18,
					"address": "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE"
				}
			},
			{
				"chainKey": "solana",
				"chainType": "SOLANA",
				"shortName": "Solana",
				"nativeCurrency": { "symbol": "SOL", "decimals": 9 }
			}
		]
	})
}

pub fn tokens_fixture() -> Value {
	json!({
		"tokens": [
			{
				"isBridgeable": true,
				"chainKey": "arbitrum",
				"address": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
				"decimals": 6,
				"symbol": "USDC",
				"name": "USD Coin",
				"price": { "usd": "1.0001" }
			},
			{
				"isBridgeable": false,
				"chainKey": "arbitrum",
				"address": "0x912CE59144191C1204E64559FE8253a0e49E6548",
				"decimals": 18,
				"symbol": "ARB"
			}
		]
	})
}

pub fn quotes_fixture() -> Value {
	json!({
		"quotes": [
			{
				"route": "stargate/v2/taxi",
				"error": null,
				"srcAmount": "1500000",
				"dstAmount": "1490000",
				"dstAmountMin": "1480000",
				"duration": { "estimated": 180.5 },
				"fees": [
					{
						"token": "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE",
						"chainKey": "ethereum",
						"amount": "2500000000000000",
						"type": "message"
					}
				],
				"steps": [
					{
						"type": "approve",
						"chainKey": "ethereum",
						"transaction": {
							"data": "0x095ea7b3",
							"to": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"
						}
					},
					{
						"type": "bridge",
						"chainKey": "ethereum",
						"transaction": {
							"data": "0xc7c7f5b3",
							"to": "0xc026395860Db2d07ee33e05fE50ed7bD583189C7",
							"value": "2500000000000000"
						}
					}
				]
			},
			{
				"route": "stargate/v2/bus",
				"error": null,
				"srcAmount": "1500000",
				"dstAmount": "1495000",
				"dstAmountMin": "1485000",
				"duration": { "estimated": 900 },
				"fees": [
					{
						"token": "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE",
						"chainKey": "ethereum",
						"amount": "1000000000000000",
						"type": "message"
					}
				],
				"steps": [
					{
						"type": "bridge",
						"chainKey": "ethereum",
						"transaction": {
							"data": "0xc7c7f5b4",
							"to": "0xc026395860Db2d07ee33e05fE50ed7bD583189C7",
							"value": "1000000000000000"
						}
					}
				]
			},
			{
				"route": "stargate/v1",
				"error": { "message": "route is paused" },
				"srcAmount": "1500000",
				"dstAmount": "0",
				"duration": { "estimated": 0 },
				"fees": [],
				"steps": []
			}
		]
	})
}

async fn respond(behavior: Option<Behavior>, fixture: fn() -> Value) -> Response {
	match behavior.unwrap_or(Behavior::Fixture) {
		Behavior::Fixture => Json(fixture()).into_response(),
		Behavior::Json(value) => Json(value).into_response(),
		Behavior::Status(code) => {
			let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
			(status, Json(json!({ "message": "fake failure" }))).into_response()
		},
		Behavior::Delay(delay) => {
			tokio::time::sleep(delay).await;
			Json(fixture()).into_response()
		},
		Behavior::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
	}
}

async fn chains(State(state): State<Arc<FakeState>>) -> Response {
	let behavior = state.chains.lock().unwrap().clone();
	respond(behavior, chains_fixture).await
}

async fn tokens(
	State(state): State<Arc<FakeState>>,
	Query(query): Query<HashMap<String, String>>,
) -> Response {
	*state.last_query.lock().unwrap() = query;
	let behavior = state.tokens.lock().unwrap().clone();
	respond(behavior, tokens_fixture).await
}

async fn quotes(
	State(state): State<Arc<FakeState>>,
	headers: HeaderMap,
	Query(query): Query<HashMap<String, String>>,
) -> Response {
	state.quote_calls.fetch_add(1, Ordering::SeqCst);
	*state.last_query.lock().unwrap() = query;
	*state.last_api_key.lock().unwrap() = headers
		.get("x-api-key")
		.and_then(|v| v.to_str().ok())
		.map(str::to_string);
	let behavior = state.quotes.lock().unwrap().clone();
	respond(behavior, quotes_fixture).await
}
