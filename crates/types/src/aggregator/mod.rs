//! Aggregator client trait, request shapes and error classification

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{AggregatorError, AggregatorResult, FailureKind};
pub use models::{QuoteQuery, TokenQuery};
pub use traits::AggregatorClient;
