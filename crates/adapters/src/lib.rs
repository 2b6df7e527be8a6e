//! xroute adapters
//!
//! HTTP clients for bridge-aggregation services.

pub mod stargate_adapter;
pub mod stargate_models;

pub use stargate_adapter::{
	StargateClient, StargateConfig, DEFAULT_API_KEY_HEADER, DEFAULT_STARGATE_BASE_URL,
	DEFAULT_TIMEOUT_MS,
};
pub use xroute_types::{AggregatorClient, AggregatorError, AggregatorResult};
