//! Blockchain network models

use serde::{Deserialize, Serialize};

use super::token::NATIVE_TOKEN_ADDRESS;

/// Native gas currency of a chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
	/// Currency symbol (e.g., "ETH", "POL", "BNB")
	pub symbol: String,
	/// Number of decimal places
	pub decimals: u8,
	/// Sentinel address used by the aggregator for the native currency
	#[serde(default = "default_native_address")]
	pub address: String,
}

fn default_native_address() -> String {
	NATIVE_TOKEN_ADDRESS.to_string()
}

impl NativeCurrency {
	pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
		Self {
			symbol: symbol.into(),
			decimals,
			address: default_native_address(),
		}
	}
}

/// Supported blockchain network
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
	/// Stable identifier used by the aggregator (e.g., "ethereum", "arbitrum")
	pub key: String,
	/// EVM chain ID (e.g., 1 for Ethereum mainnet, 42161 for Arbitrum One)
	pub chain_id: u64,
	/// Human-readable name
	pub name: String,
	pub native_currency: NativeCurrency,
}

impl ChainDescriptor {
	pub fn new(
		key: impl Into<String>,
		chain_id: u64,
		name: impl Into<String>,
		native_currency: NativeCurrency,
	) -> Self {
		Self {
			key: key.into(),
			chain_id,
			name: name.into(),
			native_currency,
		}
	}

	/// Whether `symbol` names this chain's native currency
	pub fn is_native_symbol(&self, symbol: &str) -> bool {
		self.native_currency.symbol.eq_ignore_ascii_case(symbol)
	}
}
