//! Route discovery
//!
//! Answers "can this (chain, token) pair be bridged to that one?" as cheaply as possible:
//! cache, then chain support, then the reachable-token index, then a minimal probe quote.
//! Only definitive answers are cached; transient failures read as unavailable for this
//! call and are probed again next time.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use xroute_storage::AvailabilityCache;
use xroute_types::{
	addresses_equal, AggregatorClient, Amount, FailureKind, QuoteQuery, RouteKey, TokenQuery,
};

use crate::registry::ChainRegistry;

/// Nominal probe size in source-token base units
pub const DEFAULT_PROBE_AMOUNT: u64 = 1_000_000;
/// Placeholder sender/recipient for probe quotes
pub const DEFAULT_PROBE_ADDRESS: &str = "0x000000000000000000000000000000000000dEaD";

/// Outcome of an availability check, with where the answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum RouteVerdict {
	/// Served from the availability cache
	Cached { available: bool },
	/// Source or destination chain is not known to the registry
	UnsupportedChain,
	/// Destination token listed as bridgeable from the source token
	TokenIndex,
	/// Probe returned quotes
	Probe { quotes: usize },
	/// Probe succeeded with an empty quote list
	NoQuotes,
	/// Aggregator rejected the route as unsupported
	Unsupported,
	/// Aggregator rejected the probe parameters
	Rejected,
	/// Timeout, connection failure or server error
	Transient,
	/// Aggregator response could not be understood
	ProviderData,
}

impl RouteVerdict {
	pub fn is_available(&self) -> bool {
		match self {
			RouteVerdict::Cached { available } => *available,
			RouteVerdict::TokenIndex | RouteVerdict::Probe { .. } => true,
			_ => false,
		}
	}

	/// Whether this answer may be stored in the availability cache
	pub fn is_definitive(&self) -> bool {
		matches!(
			self,
			RouteVerdict::TokenIndex
				| RouteVerdict::Probe { .. }
				| RouteVerdict::NoQuotes
				| RouteVerdict::Unsupported
		)
	}

	fn from_failure(kind: FailureKind) -> Self {
		match kind {
			FailureKind::UnsupportedRoute => RouteVerdict::Unsupported,
			FailureKind::Validation => RouteVerdict::Rejected,
			FailureKind::TransientNetwork => RouteVerdict::Transient,
			FailureKind::ProviderData => RouteVerdict::ProviderData,
		}
	}
}

pub struct RouteDiscoveryService {
	client: Arc<dyn AggregatorClient>,
	registry: Arc<ChainRegistry>,
	cache: Arc<dyn AvailabilityCache>,
	probe_amount: Amount,
	probe_address: String,
}

impl RouteDiscoveryService {
	pub fn new(
		client: Arc<dyn AggregatorClient>,
		registry: Arc<ChainRegistry>,
		cache: Arc<dyn AvailabilityCache>,
	) -> Self {
		Self {
			client,
			registry,
			cache,
			probe_amount: Amount::from(DEFAULT_PROBE_AMOUNT),
			probe_address: DEFAULT_PROBE_ADDRESS.to_string(),
		}
	}

	pub fn with_probe(mut self, amount: Amount, address: impl Into<String>) -> Self {
		self.probe_amount = amount;
		self.probe_address = address.into();
		self
	}

	pub fn registry(&self) -> &Arc<ChainRegistry> {
		&self.registry
	}

	pub async fn is_available(&self, route: &RouteKey) -> bool {
		self.check(route).await.is_available()
	}

	/// Resolve availability and report how it was decided
	pub async fn check(&self, route: &RouteKey) -> RouteVerdict {
		if let Some(available) = self.cache.get(route).as_bool() {
			debug!("Route {} availability from cache: {}", route, available);
			return RouteVerdict::Cached { available };
		}

		for chain_key in [&route.src_chain_key, &route.dst_chain_key] {
			if !self.registry.is_supported(chain_key).await {
				debug!("Route {} uses unsupported chain {}", route, chain_key);
				return RouteVerdict::UnsupportedChain;
			}
		}

		let verdict = if self.check_token_index(route).await {
			RouteVerdict::TokenIndex
		} else {
			self.probe(route).await
		};

		if verdict.is_definitive() {
			self.cache.set(route, verdict.is_available());
		}
		info!(
			"Route {} availability resolved: {} ({:?})",
			route,
			verdict.is_available(),
			verdict
		);
		verdict
	}

	/// Record a definitive negative learned elsewhere (e.g. a 422 on a real quote)
	pub fn mark_unavailable(&self, route: &RouteKey) {
		self.cache.set(route, false);
	}

	async fn check_token_index(&self, route: &RouteKey) -> bool {
		match self
			.client
			.fetch_tokens(&TokenQuery::reachable_from(route))
			.await
		{
			Ok(tokens) => tokens.iter().any(|t| {
				t.bridgeable
					&& t.chain_key == route.dst_chain_key
					&& addresses_equal(&t.address, &route.dst_token)
			}),
			Err(e) => {
				warn!("Reachable-token lookup failed for {}: {}", route, e);
				false
			},
		}
	}

	async fn probe(&self, route: &RouteKey) -> RouteVerdict {
		let query = QuoteQuery::probe(route, self.probe_amount, &self.probe_address);
		match self.client.fetch_quotes(&query).await {
			Ok(quotes) if quotes.is_empty() => RouteVerdict::NoQuotes,
			Ok(quotes) => RouteVerdict::Probe {
				quotes: quotes.len(),
			},
			Err(e) => {
				let kind = e.kind();
				if kind.is_cacheable() {
					debug!("Probe for {} reports unsupported route: {}", route, e);
				} else {
					warn!("Probe for {} failed ({:?}): {}", route, kind, e);
				}
				RouteVerdict::from_failure(kind)
			},
		}
	}
}
