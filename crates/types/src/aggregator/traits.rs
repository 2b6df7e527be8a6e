//! Seam between the engine and the bridge aggregator

use async_trait::async_trait;

use super::errors::AggregatorResult;
use super::models::{QuoteQuery, TokenQuery};
use crate::models::{ChainDescriptor, TokenDescriptor};
use crate::quotes::Quote;

/// Client for a bridge-aggregation service
///
/// Implementations issue exactly one outbound request per call and never retry.
#[async_trait]
pub trait AggregatorClient: Send + Sync {
	/// Short identifier used in logs
	fn name(&self) -> &str;

	async fn fetch_chains(&self) -> AggregatorResult<Vec<ChainDescriptor>>;

	async fn fetch_tokens(&self, query: &TokenQuery) -> AggregatorResult<Vec<TokenDescriptor>>;

	/// Quotes in provider order
	async fn fetch_quotes(&self, query: &QuoteQuery) -> AggregatorResult<Vec<Quote>>;
}
