//! Engine facade wiring registry, discovery, quoting, ranking and fallback

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use xroute_config::{ConfigValidationError, Settings, StaticCatalog};
use xroute_storage::AvailabilityCache;
use xroute_types::{
	AggregatorClient, Amount, ChainDescriptor, Quote, QuoteParams, RankingPolicy, RouteKey,
	TokenDescriptor,
};

use crate::discovery::{
	RouteDiscoveryService, RouteVerdict, DEFAULT_PROBE_ADDRESS, DEFAULT_PROBE_AMOUNT,
};
use crate::fallback::{FallbackProvider, RouteTokens};
use crate::quote_fetcher::QuoteFetcher;
use crate::ranker;
use crate::registry::{ChainRegistry, DataSource};

#[derive(Debug, Error)]
pub enum BridgeServiceError {
	#[error("configuration error: {0}")]
	Config(#[from] ConfigValidationError),
}

/// Engine tuning taken from settings
#[derive(Debug, Clone)]
pub struct BridgeServiceConfig {
	pub default_slippage: Decimal,
	pub default_policy: RankingPolicy,
	pub probe_amount: Amount,
	pub probe_address: String,
}

impl Default for BridgeServiceConfig {
	fn default() -> Self {
		Self {
			default_slippage: Decimal::new(5, 3),
			default_policy: RankingPolicy::Fastest,
			probe_amount: Amount::from(DEFAULT_PROBE_AMOUNT),
			probe_address: DEFAULT_PROBE_ADDRESS.to_string(),
		}
	}
}

impl BridgeServiceConfig {
	pub fn from_settings(settings: &Settings) -> Result<Self, BridgeServiceError> {
		Ok(Self {
			default_slippage: settings.quotes.default_slippage,
			default_policy: settings.quotes.default_policy,
			probe_amount: settings.probe_amount()?,
			probe_address: settings.discovery.probe_address.clone(),
		})
	}
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainListing {
	pub chains: Vec<ChainDescriptor>,
	pub source: DataSource,
}

/// Quotes in provider order plus the pick under the requested policy
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSelection {
	pub quotes: Vec<Quote>,
	pub best: Option<Quote>,
	pub policy: RankingPolicy,
}

/// Trait for the engine facade, consumed by the HTTP layer
#[async_trait]
pub trait BridgeServiceTrait: Send + Sync {
	async fn list_chains(&self) -> ChainListing;

	async fn tokens(&self, chain_key: &str) -> Vec<TokenDescriptor>;

	async fn resolve_token_address(&self, chain_key: &str, symbol: &str) -> Option<String>;

	async fn check_route(&self, route: &RouteKey) -> RouteVerdict;

	async fn supported_tokens_between(&self, src_chain_key: &str, dst_chain_key: &str)
		-> RouteTokens;

	async fn get_quotes(&self, params: &QuoteParams) -> Vec<Quote>;

	/// Fetch quotes and pick the best one; `None` uses the configured default policy
	async fn quote(&self, params: &QuoteParams, policy: Option<RankingPolicy>) -> QuoteSelection;

	/// Force the chain source decision and report it
	async fn chain_source(&self) -> DataSource;
}

pub struct BridgeService {
	registry: Arc<ChainRegistry>,
	discovery: Arc<RouteDiscoveryService>,
	fetcher: QuoteFetcher,
	fallback: FallbackProvider,
	default_policy: RankingPolicy,
}

impl BridgeService {
	pub fn new(
		client: Arc<dyn AggregatorClient>,
		cache: Arc<dyn AvailabilityCache>,
		catalog: Arc<StaticCatalog>,
		config: BridgeServiceConfig,
	) -> Self {
		let registry = Arc::new(ChainRegistry::new(Arc::clone(&client), catalog));
		Self::with_registry(client, cache, registry, config)
	}

	/// Build around an existing registry (e.g. one with a preset chain source)
	pub fn with_registry(
		client: Arc<dyn AggregatorClient>,
		cache: Arc<dyn AvailabilityCache>,
		registry: Arc<ChainRegistry>,
		config: BridgeServiceConfig,
	) -> Self {
		let discovery = Arc::new(
			RouteDiscoveryService::new(Arc::clone(&client), Arc::clone(&registry), cache)
				.with_probe(config.probe_amount, config.probe_address),
		);
		let fetcher = QuoteFetcher::new(
			client,
			Arc::clone(&registry),
			Arc::clone(&discovery),
			config.default_slippage,
		);
		let fallback = FallbackProvider::new(Arc::clone(&registry));

		Self {
			registry,
			discovery,
			fetcher,
			fallback,
			default_policy: config.default_policy,
		}
	}

	pub fn registry(&self) -> &Arc<ChainRegistry> {
		&self.registry
	}

	pub fn discovery(&self) -> &Arc<RouteDiscoveryService> {
		&self.discovery
	}

	pub fn fetcher(&self) -> &QuoteFetcher {
		&self.fetcher
	}
}

#[async_trait]
impl BridgeServiceTrait for BridgeService {
	async fn list_chains(&self) -> ChainListing {
		let source = self.registry.source().await;
		ChainListing {
			chains: source.chains().to_vec(),
			source: source.kind(),
		}
	}

	async fn tokens(&self, chain_key: &str) -> Vec<TokenDescriptor> {
		self.registry.tokens(chain_key).await
	}

	async fn resolve_token_address(&self, chain_key: &str, symbol: &str) -> Option<String> {
		self.registry.resolve_token_address(chain_key, symbol).await
	}

	async fn check_route(&self, route: &RouteKey) -> RouteVerdict {
		self.discovery.check(route).await
	}

	async fn supported_tokens_between(
		&self,
		src_chain_key: &str,
		dst_chain_key: &str,
	) -> RouteTokens {
		self.fallback
			.supported_tokens_between(src_chain_key, dst_chain_key)
			.await
	}

	async fn get_quotes(&self, params: &QuoteParams) -> Vec<Quote> {
		self.fetcher.get_quotes(params).await
	}

	async fn quote(&self, params: &QuoteParams, policy: Option<RankingPolicy>) -> QuoteSelection {
		let policy = policy.unwrap_or(self.default_policy);
		let quotes = self.fetcher.get_quotes(params).await;
		let best = ranker::select_best(&quotes, policy).cloned();
		QuoteSelection {
			quotes,
			best,
			policy,
		}
	}

	async fn chain_source(&self) -> DataSource {
		self.registry.source().await.kind()
	}
}
