//! xroute types
//!
//! Shared models and traits for the cross-chain bridge route engine.

pub mod aggregator;
pub mod models;
pub mod quotes;
pub mod units;

// Re-export chrono and rust_decimal for convenience
pub use chrono;
pub use rust_decimal;

pub use aggregator::{
	AggregatorClient, AggregatorError, AggregatorResult, FailureKind, QuoteQuery, TokenQuery,
};

pub use models::{
	addresses_equal, Amount, Availability, ChainDescriptor, KnownRoute,
	NativeCurrency, RouteAvailability, RouteKey, SecretString, TokenDescriptor,
	NATIVE_TOKEN_ADDRESS,
};

pub use quotes::{
	Fee, FeeKind, Quote, QuoteError, QuoteParams, QuoteValidationError, RankingPolicy, StepKind,
	TransactionStep,
};

pub use units::{apply_slippage, from_base_units, rescale, to_base_units, UnitsError};
