//! Token pairs bridgeable between two chains
//!
//! Derived from the live token tables when the aggregator answers, otherwise read from
//! the static route table. This never produces quotes.

use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use xroute_types::{AggregatorResult, KnownRoute, TokenDescriptor};

use crate::registry::{ChainRegistry, DataSource};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTokens {
	pub routes: Vec<KnownRoute>,
	pub source: DataSource,
}

pub struct FallbackProvider {
	registry: Arc<ChainRegistry>,
}

impl FallbackProvider {
	pub fn new(registry: Arc<ChainRegistry>) -> Self {
		Self { registry }
	}

	/// Same-symbol bridgeable token pairs from `src_chain_key` to `dst_chain_key`
	pub async fn supported_tokens_between(
		&self,
		src_chain_key: &str,
		dst_chain_key: &str,
	) -> RouteTokens {
		match self.live_routes(src_chain_key, dst_chain_key).await {
			Ok(routes) => RouteTokens {
				routes,
				source: DataSource::Live,
			},
			Err(e) => {
				warn!(
					"Live token tables unavailable for {} -> {} ({}), using static routes",
					src_chain_key, dst_chain_key, e
				);
				RouteTokens {
					routes: self
						.registry
						.catalog()
						.routes_between(src_chain_key, dst_chain_key)
						.cloned()
						.collect(),
					source: DataSource::Static,
				}
			},
		}
	}

	async fn live_routes(
		&self,
		src_chain_key: &str,
		dst_chain_key: &str,
	) -> AggregatorResult<Vec<KnownRoute>> {
		let src_tokens = self.registry.live_tokens(src_chain_key).await?;
		let dst_tokens = self.registry.live_tokens(dst_chain_key).await?;
		Ok(pair_by_symbol(&src_tokens, &dst_tokens, src_chain_key, dst_chain_key))
	}
}

fn pair_by_symbol(
	src_tokens: &[TokenDescriptor],
	dst_tokens: &[TokenDescriptor],
	src_chain_key: &str,
	dst_chain_key: &str,
) -> Vec<KnownRoute> {
	src_tokens
		.iter()
		.filter(|t| t.bridgeable)
		.filter_map(|src| {
			dst_tokens
				.iter()
				.find(|dst| dst.bridgeable && dst.symbol.eq_ignore_ascii_case(&src.symbol))
				.map(|dst| KnownRoute {
					symbol: src.symbol.clone(),
					src_chain_key: src_chain_key.to_string(),
					dst_chain_key: dst_chain_key.to_string(),
					src_address: src.address.clone(),
					dst_address: dst.address.clone(),
				})
		})
		.collect()
}
