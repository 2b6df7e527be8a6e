//! Normalized bridge quotes and ranking policy
//!
//! Quotes are scoped to a single request/response cycle and never persisted.

pub mod errors;
pub mod request;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use errors::{QuoteError, QuoteValidationError};
pub use request::QuoteParams;

use crate::models::Amount;

/// What a fee pays for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeeKind {
	/// Cross-chain messaging fee
	Message,
	/// Bridge protocol fee
	Protocol,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
	pub token_address: String,
	/// Amount in base units of `token_address`
	pub amount: Amount,
	pub kind: FeeKind,
	pub chain_key: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
	Approve,
	Bridge,
}

/// One transaction the execution layer must send, in order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStep {
	pub kind: StepKind,
	pub target_contract: String,
	pub call_data: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub native_value: Option<Amount>,
}

/// A normalized bridge quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
	/// Provider route label (e.g., "stargate/v2/taxi")
	pub route_label: String,
	pub src_amount: Amount,
	pub dst_amount: Amount,
	pub dst_amount_min: Amount,
	pub estimated_duration_seconds: u64,
	pub fees: Vec<Fee>,
	/// Execution order: approvals first, then bridge steps
	pub steps: Vec<TransactionStep>,
}

impl Quote {
	/// Sum of all fee amounts in base units.
	///
	/// Fees may be denominated in different tokens; the sum ignores that and is
	/// only a base-unit approximation of cost.
	pub fn total_fee(&self) -> Amount {
		self.fees
			.iter()
			.fold(Amount::ZERO, |acc, fee| acc.saturating_add(fee.amount))
	}

	/// Approval transactions that must be confirmed before bridging
	pub fn approvals(&self) -> impl Iterator<Item = &TransactionStep> {
		self.steps.iter().filter(|s| s.kind == StepKind::Approve)
	}

	pub fn bridge_steps(&self) -> impl Iterator<Item = &TransactionStep> {
		self.steps.iter().filter(|s| s.kind == StepKind::Bridge)
	}

	/// Check the amount and step-ordering invariants
	pub fn validate(&self) -> Result<(), QuoteValidationError> {
		if self.dst_amount_min > self.dst_amount {
			return Err(QuoteValidationError::MinimumExceedsOutput {
				min: self.dst_amount_min.to_string(),
				amount: self.dst_amount.to_string(),
			});
		}

		let mut seen_bridge = false;
		for (position, step) in self.steps.iter().enumerate() {
			match step.kind {
				StepKind::Bridge => seen_bridge = true,
				StepKind::Approve if seen_bridge => {
					return Err(QuoteValidationError::ApprovalAfterBridge { position });
				},
				StepKind::Approve => {},
			}
		}

		Ok(())
	}
}

/// Preference used to pick a single best quote
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankingPolicy {
	/// Minimum estimated duration
	#[default]
	Fastest,
	/// Minimum base-unit fee sum
	Cheapest,
}

impl FromStr for RankingPolicy {
	type Err = QuoteError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"fastest" => Ok(RankingPolicy::Fastest),
			"cheapest" => Ok(RankingPolicy::Cheapest),
			other => Err(QuoteError::UnknownPolicy(other.to_string())),
		}
	}
}

impl fmt::Display for RankingPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RankingPolicy::Fastest => write!(f, "fastest"),
			RankingPolicy::Cheapest => write!(f, "cheapest"),
		}
	}
}
