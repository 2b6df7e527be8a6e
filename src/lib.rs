//! xroute
//!
//! Cross-chain bridge route discovery and quoting engine: finds out whether a token can
//! be moved between two chains, fetches executable quotes from a bridge aggregator and
//! picks the best one.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

// Core domain types
pub use xroute_types::{
	chrono, rust_decimal, AggregatorClient, AggregatorError, AggregatorResult, Amount,
	Availability, ChainDescriptor, FailureKind, Fee, FeeKind, Quote, QuoteError, QuoteParams,
	RankingPolicy, RouteKey, StepKind, TokenDescriptor, TransactionStep,
};
pub use xroute_types::{from_base_units, to_base_units, UnitsError};

// Service layer
pub use xroute_service::{
	rank, select_best, BridgeService, BridgeServiceConfig, BridgeServiceTrait, ChainRegistry,
	ChainSource, DataSource, RouteDiscoveryService, RouteVerdict,
};

// Storage layer
pub use xroute_storage::{
	AvailabilityCache, Clock, ManualClock, RouteAvailabilityCache, SystemClock,
};

// API layer
pub use xroute_api::{create_router, AppState};

// Adapters
pub use xroute_adapters::{StargateClient, StargateConfig};

// Config
pub use xroute_config::{load_config, Settings, StaticCatalog};

pub mod mocks;

// Re-exported so custom aggregator clients need no extra dependencies
pub use async_trait;
pub use reqwest;

/// Builder wiring the aggregator client, availability cache and services into a router
#[derive(Default)]
pub struct BridgeBuilder {
	settings: Option<Settings>,
	client: Option<Arc<dyn AggregatorClient>>,
	clock: Option<Arc<dyn Clock>>,
}

impl BridgeBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use a custom aggregator client instead of the Stargate client built from settings
	pub fn with_client(mut self, client: Arc<dyn AggregatorClient>) -> Self {
		self.client = Some(client);
		self
	}

	/// Drive availability TTLs from a custom clock
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = Some(clock);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use xroute_config::LogFormat;

		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
		let structured = settings.logging.structured;

		let result = match settings.logging.format {
			LogFormat::Json => tracing_subscriber::fmt()
				.json()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
			LogFormat::Pretty => tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
			LogFormat::Compact => tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter)
				.with_target(structured)
				.with_thread_ids(structured)
				.try_init(),
		};
		result.map_err(|e| format!("Failed to initialize tracing: {}", e))?;

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	fn build_client(
		settings: &Settings,
	) -> Result<Arc<dyn AggregatorClient>, Box<dyn std::error::Error>> {
		let config = StargateConfig {
			base_url: settings.aggregator.base_url.clone(),
			timeout: settings.request_timeout(),
			api_key: settings.api_key()?,
			api_key_header: settings.aggregator.api_key_header.clone(),
		};
		Ok(Arc::new(StargateClient::new(config)?))
	}

	/// Build the engine and its router without binding a socket
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let client = match self.client {
			Some(client) => client,
			None => Self::build_client(&settings)?,
		};
		let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
		let cache = Arc::new(RouteAvailabilityCache::with_clock(
			settings.availability_ttl(),
			clock,
		));
		let catalog = Arc::new(settings.catalog.clone());
		let config = BridgeServiceConfig::from_settings(&settings)?;

		info!(
			"Initialized bridge engine with aggregator '{}' and {} static chains",
			client.name(),
			catalog.chains.len()
		);

		let service = BridgeService::new(client, cache, catalog, config);
		let app_state = AppState::new(Arc::new(service));
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		// Load .env file if it exists
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		self.init_tracing_from_settings(&settings)?;
		xroute_config::log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);
		xroute_config::log_engine_settings(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		xroute_config::log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  GET  /api/v1/chains");
		info!("  GET  /api/v1/tokens?chainKey=");
		info!("  GET  /api/v1/tokens/resolve?chainKey=&symbol=");
		info!("  GET  /api/v1/routes/availability");
		info!("  GET  /api/v1/routes/tokens");
		info!("  POST /api/v1/quotes");

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		xroute_config::log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
