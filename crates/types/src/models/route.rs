//! Route identity and availability models

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::token::addresses_equal;

/// Identity of a bridge route: source (chain, token) to destination (chain, token)
///
/// Token addresses compare case-insensitively; chain keys compare exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteKey {
	pub src_chain_key: String,
	pub src_token: String,
	pub dst_chain_key: String,
	pub dst_token: String,
}

impl RouteKey {
	pub fn new(
		src_chain_key: impl Into<String>,
		src_token: impl Into<String>,
		dst_chain_key: impl Into<String>,
		dst_token: impl Into<String>,
	) -> Self {
		Self {
			src_chain_key: src_chain_key.into(),
			src_token: src_token.into(),
			dst_chain_key: dst_chain_key.into(),
			dst_token: dst_token.into(),
		}
	}
}

impl PartialEq for RouteKey {
	fn eq(&self, other: &Self) -> bool {
		self.src_chain_key == other.src_chain_key
			&& self.dst_chain_key == other.dst_chain_key
			&& addresses_equal(&self.src_token, &other.src_token)
			&& addresses_equal(&self.dst_token, &other.dst_token)
	}
}

impl Eq for RouteKey {}

fn hash_address<H: Hasher>(address: &str, state: &mut H) {
	for byte in address.trim().bytes() {
		state.write_u8(byte.to_ascii_lowercase());
	}
	state.write_u8(0xff);
}

impl Hash for RouteKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.src_chain_key.hash(state);
		hash_address(&self.src_token, state);
		self.dst_chain_key.hash(state);
		hash_address(&self.dst_token, state);
	}
}

impl fmt::Display for RouteKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}:{} -> {}:{}",
			self.src_chain_key, self.src_token, self.dst_chain_key, self.dst_token
		)
	}
}

/// Cached availability verdict for a route
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteAvailability {
	pub available: bool,
	pub observed_at: DateTime<Utc>,
}

impl RouteAvailability {
	pub fn new(available: bool, observed_at: DateTime<Utc>) -> Self {
		Self {
			available,
			observed_at,
		}
	}

	/// Void once strictly older than `ttl`
	pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
		now.signed_duration_since(self.observed_at) > ttl
	}
}

/// Result of a cache lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
	Available,
	Unavailable,
	/// No entry, or the entry expired; the route must be probed
	Unknown,
}

impl Availability {
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Availability::Available => Some(true),
			Availability::Unavailable => Some(false),
			Availability::Unknown => None,
		}
	}
}

impl From<bool> for Availability {
	fn from(available: bool) -> Self {
		if available {
			Availability::Available
		} else {
			Availability::Unavailable
		}
	}
}

/// Hand-maintained route known to work, used when live discovery is unreachable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KnownRoute {
	pub symbol: String,
	pub src_chain_key: String,
	pub dst_chain_key: String,
	pub src_address: String,
	pub dst_address: String,
}

impl KnownRoute {
	pub fn route_key(&self) -> RouteKey {
		RouteKey::new(
			self.src_chain_key.clone(),
			self.src_address.clone(),
			self.dst_chain_key.clone(),
			self.dst_address.clone(),
		)
	}

	pub fn connects(&self, src_chain_key: &str, dst_chain_key: &str) -> bool {
		self.src_chain_key == src_chain_key && self.dst_chain_key == dst_chain_key
	}
}
