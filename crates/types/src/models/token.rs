//! Token models and address helpers

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Address the aggregator uses to denote a chain's native currency
pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Case-insensitive address comparison
pub fn addresses_equal(a: &str, b: &str) -> bool {
	a.trim().eq_ignore_ascii_case(b.trim())
}

/// Token known to the aggregator on a given chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
	pub chain_key: String,
	/// Contract address, or [`NATIVE_TOKEN_ADDRESS`] for the native currency
	pub address: String,
	pub decimals: u8,
	pub symbol: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Whether the aggregator can move this token cross-chain
	pub bridgeable: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub price_usd: Option<Decimal>,
}

impl TokenDescriptor {
	pub fn new(
		chain_key: impl Into<String>,
		address: impl Into<String>,
		symbol: impl Into<String>,
		decimals: u8,
		bridgeable: bool,
	) -> Self {
		Self {
			chain_key: chain_key.into(),
			address: address.into(),
			decimals,
			symbol: symbol.into(),
			name: None,
			bridgeable,
			price_usd: None,
		}
	}

	/// Whether this token sits at `(chain_key, address)`
	pub fn matches(&self, chain_key: &str, address: &str) -> bool {
		self.chain_key == chain_key && addresses_equal(&self.address, address)
	}
}
