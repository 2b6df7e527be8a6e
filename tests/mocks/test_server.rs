//! Spawns the full engine on an ephemeral port

use std::sync::Arc;

use tokio::task::JoinHandle;
use xroute::chrono::Utc;
use xroute::mocks::MockAggregator;
use xroute::{BridgeBuilder, ManualClock, Settings};

pub struct TestServer {
	pub base_url: String,
	pub aggregator: Arc<MockAggregator>,
	pub clock: Arc<ManualClock>,
	handle: JoinHandle<()>,
}

impl TestServer {
	pub async fn spawn(aggregator: MockAggregator) -> Self {
		Self::spawn_with_settings(Settings::default(), aggregator).await
	}

	pub async fn spawn_with_settings(settings: Settings, aggregator: MockAggregator) -> Self {
		let aggregator = Arc::new(aggregator);
		let clock = Arc::new(ManualClock::new(Utc::now()));

		let (app, _state) = BridgeBuilder::new()
			.with_settings(settings)
			.with_client(aggregator.clone())
			.with_clock(clock.clone())
			.start()
			.await
			.expect("engine should build");

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind test server port");
		let addr = listener.local_addr().unwrap();
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Self {
			base_url,
			aggregator,
			clock,
			handle,
		}
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}
