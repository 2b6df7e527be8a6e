//! Shared mocks and fixtures for service tests

use async_trait::async_trait;
use std::sync::Arc;
use xroute_config::StaticCatalog;
use xroute_types::{
	AggregatorClient, AggregatorResult, Amount, ChainDescriptor, Fee, FeeKind, Quote, QuoteQuery,
	TokenDescriptor, TokenQuery,
};

use crate::registry::{ChainRegistry, ChainSource};

mockall::mock! {
	pub Aggregator {}

	#[async_trait]
	impl AggregatorClient for Aggregator {
		fn name(&self) -> &str;
		async fn fetch_chains(&self) -> AggregatorResult<Vec<ChainDescriptor>>;
		async fn fetch_tokens(&self, query: &TokenQuery) -> AggregatorResult<Vec<TokenDescriptor>>;
		async fn fetch_quotes(&self, query: &QuoteQuery) -> AggregatorResult<Vec<Quote>>;
	}
}

pub const ETH_USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const ARB_USDC: &str = "0xaf88d065e77c8cC2239327C5EDb3A432268e5831";

/// Registry already settled on the static catalogue, so it never lists chains remotely
pub fn static_registry(client: Arc<MockAggregator>) -> Arc<ChainRegistry> {
	let catalog = Arc::new(StaticCatalog::default());
	Arc::new(ChainRegistry::with_source(
		client,
		catalog.clone(),
		ChainSource::Static(catalog),
	))
}

pub fn quote(route_label: &str, dst_amount: u64, duration: u64, fees: &[u128]) -> Quote {
	Quote {
		route_label: route_label.to_string(),
		src_amount: Amount::from(1_500_000_000_000_000_000u128),
		dst_amount: Amount::from(dst_amount),
		dst_amount_min: Amount::ZERO,
		estimated_duration_seconds: duration,
		fees: fees
			.iter()
			.map(|amount| Fee {
				token_address: xroute_types::NATIVE_TOKEN_ADDRESS.to_string(),
				amount: Amount::from(*amount),
				kind: FeeKind::Message,
				chain_key: "ethereum".to_string(),
			})
			.collect(),
		steps: Vec::new(),
	}
}
