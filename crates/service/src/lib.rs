//! xroute service
//!
//! Chain registry, route discovery, quote fetching and ranking.

pub mod bridge;
pub mod discovery;
pub mod fallback;
pub mod quote_fetcher;
pub mod ranker;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::{
	BridgeService, BridgeServiceConfig, BridgeServiceError, BridgeServiceTrait, ChainListing,
	QuoteSelection,
};
pub use discovery::{RouteDiscoveryService, RouteVerdict};
pub use fallback::{FallbackProvider, RouteTokens};
pub use quote_fetcher::{QuoteFetchError, QuoteFetcher};
pub use ranker::{rank, select_best};
pub use registry::{ChainRegistry, ChainSource, DataSource};
