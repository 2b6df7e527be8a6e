//! Base-unit token amounts
//!
//! Amounts travel over the wire as decimal strings to preserve precision. Internally
//! they are 256-bit unsigned integers.

use alloy_primitives::U256;
use serde::de::{self, Visitor};
use std::fmt;
use std::str::FromStr;

/// Non-negative integer amount expressed in a token's smallest unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub U256);

impl Amount {
	pub const ZERO: Amount = Amount(U256::ZERO);

	pub fn new(value: U256) -> Self {
		Self(value)
	}

	pub fn as_u256(&self) -> U256 {
		self.0
	}

	pub fn is_zero(&self) -> bool {
		self.0.is_zero()
	}

	/// Try to narrow to u128 (fails for values above u128::MAX)
	pub fn to_u128(&self) -> Option<u128> {
		u128::try_from(self.0).ok()
	}

	pub fn saturating_add(self, other: Amount) -> Amount {
		Amount(self.0.saturating_add(other.0))
	}

	/// Parse a decimal (or `0x`-prefixed hex) integer string
	pub fn parse(value: &str) -> Result<Self, String> {
		let value = value.trim();
		if value.is_empty() {
			return Err("amount cannot be empty".to_string());
		}
		let parsed = match value.strip_prefix("0x") {
			Some(hex) => U256::from_str_radix(hex, 16),
			None => U256::from_str_radix(value, 10),
		};
		parsed
			.map(Self)
			.map_err(|e| format!("invalid amount '{}': {}", value, e))
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Amount {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl From<u64> for Amount {
	fn from(value: u64) -> Self {
		Self(U256::from(value))
	}
}

impl From<u128> for Amount {
	fn from(value: u128) -> Self {
		Self(U256::from(value))
	}
}

impl From<U256> for Amount {
	fn from(value: U256) -> Self {
		Self(value)
	}
}

impl serde::Serialize for Amount {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.collect_str(&self.0)
	}
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
	type Value = Amount;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("a non-negative integer or an integer string")
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
		Ok(Amount::from(v))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
		u64::try_from(v)
			.map(Amount::from)
			.map_err(|_| E::custom("amount cannot be negative"))
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
		Amount::parse(v).map_err(E::custom)
	}
}

impl<'de> serde::Deserialize<'de> for Amount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		deserializer.deserialize_any(AmountVisitor)
	}
}
