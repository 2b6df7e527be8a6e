//! Request shapes sent to the bridge aggregator

use serde::{Deserialize, Serialize};

use crate::models::{Amount, RouteKey};

/// Which token listing to fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "scope")]
pub enum TokenQuery {
	/// Every token on every chain
	All,
	/// Tokens on a single chain
	Chain { chain_key: String },
	/// Tokens reachable from a specific source token
	ReachableFrom { src_chain_key: String, src_token: String },
}

impl TokenQuery {
	pub fn chain(chain_key: impl Into<String>) -> Self {
		Self::Chain {
			chain_key: chain_key.into(),
		}
	}

	pub fn reachable_from(route: &RouteKey) -> Self {
		Self::ReachableFrom {
			src_chain_key: route.src_chain_key.clone(),
			src_token: route.src_token.clone(),
		}
	}

	/// Query-string pairs for the tokens endpoint
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		match self {
			TokenQuery::All => Vec::new(),
			TokenQuery::Chain { chain_key } => vec![("chainKey", chain_key.clone())],
			TokenQuery::ReachableFrom {
				src_chain_key,
				src_token,
			} => vec![
				("srcChainKey", src_chain_key.clone()),
				("srcToken", src_token.clone()),
			],
		}
	}
}

/// Quote request in base units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
	pub src_token: String,
	pub dst_token: String,
	pub src_address: String,
	pub dst_address: String,
	pub src_chain_key: String,
	pub dst_chain_key: String,
	pub src_amount: Amount,
	pub dst_amount_min: Amount,
}

impl QuoteQuery {
	/// Minimal, non-committal request used only to test route viability
	pub fn probe(route: &RouteKey, amount: Amount, placeholder_address: &str) -> Self {
		Self {
			src_token: route.src_token.clone(),
			dst_token: route.dst_token.clone(),
			src_address: placeholder_address.to_string(),
			dst_address: placeholder_address.to_string(),
			src_chain_key: route.src_chain_key.clone(),
			dst_chain_key: route.dst_chain_key.clone(),
			src_amount: amount,
			dst_amount_min: Amount::ZERO,
		}
	}

	pub fn route_key(&self) -> RouteKey {
		RouteKey::new(
			self.src_chain_key.clone(),
			self.src_token.clone(),
			self.dst_chain_key.clone(),
			self.dst_token.clone(),
		)
	}

	/// Query-string pairs for the quotes endpoint
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		vec![
			("srcToken", self.src_token.clone()),
			("dstToken", self.dst_token.clone()),
			("srcAddress", self.src_address.clone()),
			("dstAddress", self.dst_address.clone()),
			("srcChainKey", self.src_chain_key.clone()),
			("dstChainKey", self.dst_chain_key.clone()),
			("srcAmount", self.src_amount.to_string()),
			("dstAmountMin", self.dst_amount_min.to_string()),
		]
	}
}
