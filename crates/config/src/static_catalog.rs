//! Hand-maintained chain and route tables
//!
//! This is the single copy of the fallback data. The chain registry reads it when the
//! aggregator's chain listing is unreachable and the fallback provider answers the
//! "tokens between two chains" query from it. It never carries quote data.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use xroute_types::{ChainDescriptor, KnownRoute, NativeCurrency, NATIVE_TOKEN_ADDRESS};

use crate::settings::ConfigValidationError;

/// Static chains and known-good routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaticCatalog {
	pub chains: Vec<ChainDescriptor>,
	pub routes: Vec<KnownRoute>,
}

/// Per-symbol token placements the default route table is expanded from
const DEFAULT_TOKENS: &[(&str, &[(&str, &str)])] = &[
	(
		"USDC",
		&[
			("ethereum", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
			("arbitrum", "0xaf88d065e77c8cC2239327C5EDb3A432268e5831"),
			("optimism", "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85"),
			("polygon", "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
			("base", "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
		],
	),
	(
		"USDT",
		&[
			("ethereum", "0xdAC17F958D2ee523a2206206994597C13D831ec7"),
			("arbitrum", "0xFd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"),
			("optimism", "0x94b008aA00579c1307B0EF2c499aD98a8ce58e58"),
			("polygon", "0xc2132D05D31c914a87C6611C10748AEb04B58e8F"),
		],
	),
	(
		"ETH",
		&[
			("ethereum", NATIVE_TOKEN_ADDRESS),
			("arbitrum", NATIVE_TOKEN_ADDRESS),
			("optimism", NATIVE_TOKEN_ADDRESS),
			("base", NATIVE_TOKEN_ADDRESS),
		],
	),
];

impl Default for StaticCatalog {
	fn default() -> Self {
		let chains = vec![
			ChainDescriptor::new("ethereum", 1, "Ethereum", NativeCurrency::new("ETH", 18)),
			ChainDescriptor::new("arbitrum", 42161, "Arbitrum", NativeCurrency::new("ETH", 18)),
			ChainDescriptor::new("optimism", 10, "Optimism", NativeCurrency::new("ETH", 18)),
			ChainDescriptor::new("polygon", 137, "Polygon", NativeCurrency::new("POL", 18)),
			ChainDescriptor::new("base", 8453, "Base", NativeCurrency::new("ETH", 18)),
			ChainDescriptor::new("bsc", 56, "BNB Chain", NativeCurrency::new("BNB", 18)),
			ChainDescriptor::new("avalanche", 43114, "Avalanche", NativeCurrency::new("AVAX", 18)),
		];

		let mut routes = Vec::new();
		for (symbol, placements) in DEFAULT_TOKENS {
			for (src_chain, src_address) in placements.iter() {
				for (dst_chain, dst_address) in placements.iter() {
					if src_chain == dst_chain {
						continue;
					}
					routes.push(KnownRoute {
						symbol: symbol.to_string(),
						src_chain_key: src_chain.to_string(),
						dst_chain_key: dst_chain.to_string(),
						src_address: src_address.to_string(),
						dst_address: dst_address.to_string(),
					});
				}
			}
		}

		Self { chains, routes }
	}
}

impl StaticCatalog {
	pub fn chain(&self, key: &str) -> Option<&ChainDescriptor> {
		self.chains.iter().find(|c| c.key == key)
	}

	pub fn routes_between<'a>(
		&'a self,
		src_chain_key: &'a str,
		dst_chain_key: &'a str,
	) -> impl Iterator<Item = &'a KnownRoute> + 'a {
		self.routes
			.iter()
			.filter(move |r| r.connects(src_chain_key, dst_chain_key))
	}

	/// Address of `symbol` on `chain_key` according to the route table
	pub fn token_address(&self, chain_key: &str, symbol: &str) -> Option<&str> {
		self.routes.iter().find_map(|r| {
			if !r.symbol.eq_ignore_ascii_case(symbol) {
				return None;
			}
			if r.src_chain_key == chain_key {
				Some(r.src_address.as_str())
			} else if r.dst_chain_key == chain_key {
				Some(r.dst_address.as_str())
			} else {
				None
			}
		})
	}

	/// Startup check: the catalogue must be usable on its own
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.chains.is_empty() {
			return Err(ConfigValidationError::EmptyCatalog);
		}

		let mut keys = HashSet::new();
		for chain in &self.chains {
			if !keys.insert(chain.key.as_str()) {
				return Err(ConfigValidationError::DuplicateChain {
					key: chain.key.clone(),
				});
			}
		}

		for route in &self.routes {
			for key in [&route.src_chain_key, &route.dst_chain_key] {
				if !keys.contains(key.as_str()) {
					return Err(ConfigValidationError::UnknownRouteChain {
						symbol: route.symbol.clone(),
						key: key.clone(),
					});
				}
			}
		}

		Ok(())
	}
}
