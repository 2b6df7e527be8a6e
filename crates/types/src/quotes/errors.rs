//! Error types for quote operations

use rust_decimal::Decimal;
use thiserror::Error;

use crate::units::UnitsError;

/// Validation errors for quote parameters and provider quotes
#[derive(Error, Debug)]
pub enum QuoteValidationError {
	#[error("Invalid token address: {field}")]
	InvalidTokenAddress { field: String },

	#[error("Invalid amount: {field} - {reason}")]
	InvalidAmount { field: String, reason: String },

	#[error("Invalid slippage tolerance: {value} (must be within [0, 1))")]
	InvalidSlippageTolerance { value: Decimal },

	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Minimum output {min} exceeds quoted output {amount}")]
	MinimumExceedsOutput { min: String, amount: String },

	#[error("Approval step at position {position} follows a bridge step")]
	ApprovalAfterBridge { position: usize },
}

/// General quote-related errors
#[derive(Error, Debug)]
pub enum QuoteError {
	#[error("Quote validation failed: {0}")]
	Validation(#[from] QuoteValidationError),

	#[error("Unit conversion failed: {0}")]
	Units(#[from] UnitsError),

	#[error("Unknown ranking policy: {0}")]
	UnknownPolicy(String),
}
