//! Quote fetching
//!
//! Converts user-facing parameters into a base-unit aggregator request and normalizes
//! the returned quotes. Every failure degrades to an empty list for callers; the typed
//! error is still available through [`QuoteFetcher::try_get_quotes`].

use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use xroute_types::{
	apply_slippage, AggregatorClient, AggregatorError, FailureKind, Quote, QuoteError, QuoteParams,
	QuoteQuery, RouteKey,
};

use crate::discovery::RouteDiscoveryService;
use crate::registry::ChainRegistry;

#[derive(Debug, Error)]
pub enum QuoteFetchError {
	#[error("invalid quote parameters: {0}")]
	InvalidParams(#[from] QuoteError),
	#[error("chain not supported: {chain_key}")]
	UnsupportedChain { chain_key: String },
	#[error("route not available: {route}")]
	RouteUnavailable { route: RouteKey },
	#[error("aggregator error: {0}")]
	Aggregator(#[from] AggregatorError),
}

impl QuoteFetchError {
	/// Aggregator failure classification, if the error came from the aggregator
	pub fn failure_kind(&self) -> Option<FailureKind> {
		match self {
			QuoteFetchError::Aggregator(e) => Some(e.kind()),
			_ => None,
		}
	}
}

/// Resolved request ready to be sent
#[derive(Debug, Clone)]
struct PreparedRequest {
	query: QuoteQuery,
	slippage: Decimal,
}

pub struct QuoteFetcher {
	client: Arc<dyn AggregatorClient>,
	registry: Arc<ChainRegistry>,
	discovery: Arc<RouteDiscoveryService>,
	default_slippage: Decimal,
}

impl QuoteFetcher {
	pub fn new(
		client: Arc<dyn AggregatorClient>,
		registry: Arc<ChainRegistry>,
		discovery: Arc<RouteDiscoveryService>,
		default_slippage: Decimal,
	) -> Self {
		Self {
			client,
			registry,
			discovery,
			default_slippage,
		}
	}

	/// Quotes for a route, checking availability first
	pub async fn get_quotes(&self, params: &QuoteParams) -> Vec<Quote> {
		self.try_get_quotes(params, true)
			.await
			.unwrap_or_else(|e| Self::degrade(params, e))
	}

	/// Quotes for a route the caller already knows to be available
	pub async fn get_quotes_unchecked(&self, params: &QuoteParams) -> Vec<Quote> {
		self.try_get_quotes(params, false)
			.await
			.unwrap_or_else(|e| Self::degrade(params, e))
	}

	pub async fn try_get_quotes(
		&self,
		params: &QuoteParams,
		check_availability: bool,
	) -> Result<Vec<Quote>, QuoteFetchError> {
		let request = self.prepare(params)?;

		for chain_key in [&params.src_chain_key, &params.dst_chain_key] {
			if !self.registry.is_supported(chain_key).await {
				return Err(QuoteFetchError::UnsupportedChain {
					chain_key: chain_key.clone(),
				});
			}
		}

		let route = params.route_key();
		if check_availability && !self.discovery.is_available(&route).await {
			return Err(QuoteFetchError::RouteUnavailable { route });
		}

		debug!(
			"Requesting quotes for {} with srcAmount={} dstAmountMin={}",
			route, request.query.src_amount, request.query.dst_amount_min
		);

		let quotes = match self.client.fetch_quotes(&request.query).await {
			Ok(quotes) => quotes,
			Err(e) => {
				if e.kind().is_cacheable() {
					self.discovery.mark_unavailable(&route);
				}
				return Err(e.into());
			},
		};

		let quotes: Vec<Quote> = quotes
			.into_iter()
			.filter_map(|quote| Self::with_slippage_floor(quote, request.slippage))
			.collect();

		info!("Fetched {} quotes for {}", quotes.len(), route);
		Ok(quotes)
	}

	/// Validate and convert to base units without touching the network
	fn prepare(&self, params: &QuoteParams) -> Result<PreparedRequest, QuoteError> {
		params.validate()?;
		let slippage = params.slippage.unwrap_or(self.default_slippage);
		let src_amount = params.src_amount()?;
		let dst_amount_min = apply_slippage(params.requested_output(src_amount), slippage)?;

		let query = QuoteQuery {
			src_token: params.src_token.clone(),
			dst_token: params.dst_token.clone(),
			src_address: params.src_address.clone(),
			dst_address: params.dst_address.clone(),
			src_chain_key: params.src_chain_key.clone(),
			dst_chain_key: params.dst_chain_key.clone(),
			src_amount,
			dst_amount_min,
		};

		Ok(PreparedRequest { query, slippage })
	}

	/// Recompute the guaranteed minimum from the quoted output
	fn with_slippage_floor(mut quote: Quote, slippage: Decimal) -> Option<Quote> {
		match apply_slippage(quote.dst_amount, slippage) {
			Ok(min) => {
				quote.dst_amount_min = min;
				Some(quote)
			},
			Err(e) => {
				warn!("Dropping quote {}: {}", quote.route_label, e);
				None
			},
		}
	}

	fn degrade(params: &QuoteParams, error: QuoteFetchError) -> Vec<Quote> {
		match &error {
			QuoteFetchError::InvalidParams(_) | QuoteFetchError::UnsupportedChain { .. } => {
				debug!("No quotes for {}: {}", params.route_key(), error)
			},
			QuoteFetchError::RouteUnavailable { .. } => info!("{}", error),
			QuoteFetchError::Aggregator(_) => {
				warn!("Quote request for {} failed: {}", params.route_key(), error)
			},
		}
		Vec::new()
	}
}
