//! Scripted aggregator for demos and tests
//!
//! Replies are configured up front and every call is counted, so tests can assert how
//! many requests actually reached the "network".

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use xroute_types::{
	AggregatorClient, AggregatorError, AggregatorResult, Amount, ChainDescriptor, Fee, FeeKind,
	Quote, QuoteQuery, StepKind, TokenDescriptor, TokenQuery, TransactionStep,
	NATIVE_TOKEN_ADDRESS,
};

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockReply<T> {
	Ok(T),
	/// Non-2xx status from the aggregator
	Status(u16),
	Timeout,
	/// 2xx with a body that cannot be parsed
	Malformed,
}

impl<T: Clone> MockReply<T> {
	fn produce(&self) -> AggregatorResult<T> {
		match self {
			MockReply::Ok(value) => Ok(value.clone()),
			MockReply::Status(status) => Err(AggregatorError::from_http_failure(*status)),
			MockReply::Timeout => Err(AggregatorError::Timeout { timeout_ms: 10_000 }),
			MockReply::Malformed => Err(AggregatorError::InvalidResponse {
				reason: "mock malformed body".to_string(),
			}),
		}
	}
}

#[derive(Debug, Default)]
struct CallCounts {
	chains: AtomicUsize,
	tokens: AtomicUsize,
	quotes: AtomicUsize,
}

/// Aggregator client answering from a script
#[derive(Debug)]
pub struct MockAggregator {
	chains: MockReply<Vec<ChainDescriptor>>,
	tokens: MockReply<Vec<TokenDescriptor>>,
	quotes: MockReply<Vec<Quote>>,
	queued_quotes: Mutex<VecDeque<MockReply<Vec<Quote>>>>,
	calls: CallCounts,
}

impl MockAggregator {
	/// Chain listing fails, token index is empty, every quote request returns one quote
	pub fn new() -> Self {
		Self {
			chains: MockReply::Status(503),
			tokens: MockReply::Ok(Vec::new()),
			quotes: MockReply::Ok(vec![sample_quote("stargate/v2/taxi", 1_000_000, 180)]),
			queued_quotes: Mutex::new(VecDeque::new()),
			calls: CallCounts::default(),
		}
	}

	pub fn with_chains(mut self, reply: MockReply<Vec<ChainDescriptor>>) -> Self {
		self.chains = reply;
		self
	}

	pub fn with_tokens(mut self, reply: MockReply<Vec<TokenDescriptor>>) -> Self {
		self.tokens = reply;
		self
	}

	/// Reply used once the queue is drained
	pub fn with_quotes(mut self, reply: MockReply<Vec<Quote>>) -> Self {
		self.quotes = reply;
		self
	}

	/// One-shot reply consumed by the next quote request
	pub fn push_quote_reply(&self, reply: MockReply<Vec<Quote>>) {
		self.queued_quotes
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.push_back(reply);
	}

	pub fn chain_calls(&self) -> usize {
		self.calls.chains.load(Ordering::SeqCst)
	}

	pub fn token_calls(&self) -> usize {
		self.calls.tokens.load(Ordering::SeqCst)
	}

	pub fn quote_calls(&self) -> usize {
		self.calls.quotes.load(Ordering::SeqCst)
	}
}

impl Default for MockAggregator {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl AggregatorClient for MockAggregator {
	fn name(&self) -> &str {
		"mock"
	}

	async fn fetch_chains(&self) -> AggregatorResult<Vec<ChainDescriptor>> {
		self.calls.chains.fetch_add(1, Ordering::SeqCst);
		self.chains.produce()
	}

	async fn fetch_tokens(&self, _query: &TokenQuery) -> AggregatorResult<Vec<TokenDescriptor>> {
		self.calls.tokens.fetch_add(1, Ordering::SeqCst);
		self.tokens.produce()
	}

	async fn fetch_quotes(&self, _query: &QuoteQuery) -> AggregatorResult<Vec<Quote>> {
		self.calls.quotes.fetch_add(1, Ordering::SeqCst);
		let queued = self
			.queued_quotes
			.lock()
			.unwrap_or_else(|e| e.into_inner())
			.pop_front();
		queued.unwrap_or_else(|| self.quotes.clone()).produce()
	}
}

/// Approve-then-bridge quote paying a native messaging fee
pub fn sample_quote(route_label: &str, dst_amount: u64, duration_seconds: u64) -> Quote {
	Quote {
		route_label: route_label.to_string(),
		src_amount: Amount::from(dst_amount),
		dst_amount: Amount::from(dst_amount),
		dst_amount_min: Amount::from(dst_amount),
		estimated_duration_seconds: duration_seconds,
		fees: vec![Fee {
			token_address: NATIVE_TOKEN_ADDRESS.to_string(),
			amount: Amount::from(15_000_000_000_000u64),
			kind: FeeKind::Message,
			chain_key: "ethereum".to_string(),
		}],
		steps: vec![
			TransactionStep {
				kind: StepKind::Approve,
				target_contract: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".to_string(),
				call_data: "0x095ea7b3".to_string(),
				native_value: None,
			},
			TransactionStep {
				kind: StepKind::Bridge,
				target_contract: "0xc026395860Db2d07ee33e05fE50ed7bD583189C7".to_string(),
				call_data: "0xc7c7f5b3".to_string(),
				native_value: Some(Amount::from(15_000_000_000_000u64)),
			},
		],
	}
}
