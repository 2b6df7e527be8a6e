//! Chain and token registry
//!
//! The chain listing is fetched from the aggregator on first use. When that fails the
//! registry settles on the static catalogue instead and never surfaces the error.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use xroute_config::StaticCatalog;
use xroute_types::{
	addresses_equal, AggregatorClient, AggregatorResult, ChainDescriptor, TokenDescriptor,
	TokenQuery,
};

/// Where a piece of reference data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
	Live,
	Static,
}

/// The chain listing in effect
#[derive(Debug, Clone)]
pub enum ChainSource {
	Live(Vec<ChainDescriptor>),
	Static(Arc<StaticCatalog>),
}

impl ChainSource {
	pub fn chains(&self) -> &[ChainDescriptor] {
		match self {
			ChainSource::Live(chains) => chains,
			ChainSource::Static(catalog) => &catalog.chains,
		}
	}

	pub fn kind(&self) -> DataSource {
		match self {
			ChainSource::Live(_) => DataSource::Live,
			ChainSource::Static(_) => DataSource::Static,
		}
	}

	pub fn chain(&self, chain_key: &str) -> Option<&ChainDescriptor> {
		self.chains().iter().find(|c| c.key == chain_key)
	}
}

pub struct ChainRegistry {
	client: Arc<dyn AggregatorClient>,
	catalog: Arc<StaticCatalog>,
	source: RwLock<Option<Arc<ChainSource>>>,
	tokens: DashMap<String, Vec<TokenDescriptor>>,
}

impl ChainRegistry {
	pub fn new(client: Arc<dyn AggregatorClient>, catalog: Arc<StaticCatalog>) -> Self {
		Self {
			client,
			catalog,
			source: RwLock::new(None),
			tokens: DashMap::new(),
		}
	}

	/// Registry whose chain source is already decided
	pub fn with_source(
		client: Arc<dyn AggregatorClient>,
		catalog: Arc<StaticCatalog>,
		source: ChainSource,
	) -> Self {
		Self {
			client,
			catalog,
			source: RwLock::new(Some(Arc::new(source))),
			tokens: DashMap::new(),
		}
	}

	pub fn catalog(&self) -> &Arc<StaticCatalog> {
		&self.catalog
	}

	/// The chain source, loading it on first use
	pub async fn source(&self) -> Arc<ChainSource> {
		if let Some(source) = self.source.read().await.as_ref() {
			return Arc::clone(source);
		}

		let mut guard = self.source.write().await;
		// Another caller may have loaded it while we waited for the write lock
		if let Some(source) = guard.as_ref() {
			return Arc::clone(source);
		}

		let source = Arc::new(self.load_source().await);
		*guard = Some(Arc::clone(&source));
		source
	}

	/// Source decided so far, without triggering a load
	pub async fn current_source(&self) -> Option<DataSource> {
		self.source.read().await.as_ref().map(|s| s.kind())
	}

	async fn load_source(&self) -> ChainSource {
		match self.client.fetch_chains().await {
			Ok(chains) => {
				info!("Loaded {} chains from the aggregator", chains.len());
				ChainSource::Live(chains)
			},
			Err(e) => {
				warn!(
					"Chain listing unavailable ({}), falling back to {} static chains",
					e,
					self.catalog.chains.len()
				);
				ChainSource::Static(Arc::clone(&self.catalog))
			},
		}
	}

	/// Re-fetch the chain listing; a failed refresh keeps the previous source
	pub async fn refresh_chains(&self) -> DataSource {
		// Readers keep the current source while the listing is in flight
		let fetched = self.client.fetch_chains().await;
		let mut guard = self.source.write().await;
		match fetched {
			Ok(chains) => {
				info!("Refreshed chain listing: {} chains", chains.len());
				*guard = Some(Arc::new(ChainSource::Live(chains)));
				DataSource::Live
			},
			Err(e) => {
				warn!("Chain refresh failed: {}", e);
				let source = guard
					.get_or_insert_with(|| Arc::new(ChainSource::Static(Arc::clone(&self.catalog))));
				source.kind()
			},
		}
	}

	pub async fn list_chains(&self) -> Vec<ChainDescriptor> {
		self.source().await.chains().to_vec()
	}

	pub async fn chain(&self, chain_key: &str) -> Option<ChainDescriptor> {
		self.source().await.chain(chain_key).cloned()
	}

	pub async fn is_supported(&self, chain_key: &str) -> bool {
		self.source().await.chain(chain_key).is_some()
	}

	/// Token table for a chain, fetched once and cached
	pub async fn live_tokens(&self, chain_key: &str) -> AggregatorResult<Vec<TokenDescriptor>> {
		if let Some(tokens) = self.tokens.get(chain_key) {
			return Ok(tokens.value().clone());
		}

		let tokens = self.client.fetch_tokens(&TokenQuery::chain(chain_key)).await?;
		debug!("Cached {} tokens for chain {}", tokens.len(), chain_key);
		self.tokens.insert(chain_key.to_string(), tokens.clone());
		Ok(tokens)
	}

	/// Tokens on a supported chain; empty when the chain is unknown or the listing fails
	pub async fn tokens(&self, chain_key: &str) -> Vec<TokenDescriptor> {
		if !self.is_supported(chain_key).await {
			return Vec::new();
		}
		match self.live_tokens(chain_key).await {
			Ok(tokens) => tokens,
			Err(e) => {
				warn!("Token listing for {} unavailable: {}", chain_key, e);
				Vec::new()
			},
		}
	}

	/// Replace the cached token table; the old table stays if the fetch fails
	pub async fn refresh_tokens(&self, chain_key: &str) -> AggregatorResult<usize> {
		let tokens = self.client.fetch_tokens(&TokenQuery::chain(chain_key)).await?;
		let count = tokens.len();
		self.tokens.insert(chain_key.to_string(), tokens);
		debug!("Refreshed {} tokens for chain {}", count, chain_key);
		Ok(count)
	}

	/// Resolve a symbol to its address on a chain
	pub async fn resolve_token_address(&self, chain_key: &str, symbol: &str) -> Option<String> {
		let chain = self.chain(chain_key).await?;
		if chain.is_native_symbol(symbol) {
			return Some(chain.native_currency.address.clone());
		}

		match self.live_tokens(chain_key).await {
			Ok(tokens) => tokens
				.into_iter()
				.find(|t| t.symbol.eq_ignore_ascii_case(symbol))
				.map(|t| t.address),
			Err(e) => {
				debug!(
					"Resolving {} on {} from static routes after token fetch failed: {}",
					symbol, chain_key, e
				);
				self.catalog
					.token_address(chain_key, symbol)
					.map(str::to_string)
			},
		}
	}

	/// Token descriptor by address from the cached table, if any
	pub fn cached_token(&self, chain_key: &str, address: &str) -> Option<TokenDescriptor> {
		self.tokens.get(chain_key).and_then(|tokens| {
			tokens
				.iter()
				.find(|t| addresses_equal(&t.address, address))
				.cloned()
		})
	}
}

impl std::fmt::Debug for ChainRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ChainRegistry")
			.field("client", &self.client.name())
			.field("cached_token_chains", &self.tokens.len())
			.finish()
	}
}
