//! Conversion between human-readable decimal amounts and integer base units
//!
//! `to_base_units` truncates surplus fractional digits and never rounds up, so a
//! request never asks for more than the user typed. `from_base_units` is exact.
//! The pair is deliberately not a perfect inverse.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Amount;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
	#[error("amount is empty")]
	Empty,

	#[error("invalid decimal amount '{value}'")]
	InvalidFormat { value: String },

	#[error("amount '{value}' does not fit in 256 bits with {decimals} decimals")]
	Overflow { value: String, decimals: u8 },

	#[error("slippage must be within [0, 1), got {value}")]
	InvalidSlippage { value: Decimal },
}

fn pow10(exp: u32) -> U256 {
	U256::from(10u64).pow(U256::from(exp))
}

/// Parse `value` (e.g. "1.5") into base units for a token with `decimals` decimals
pub fn to_base_units(value: &str, decimals: u8) -> Result<Amount, UnitsError> {
	let value = value.trim();
	if value.is_empty() {
		return Err(UnitsError::Empty);
	}

	let invalid = || UnitsError::InvalidFormat {
		value: value.to_string(),
	};

	let (int_part, frac_part) = value.split_once('.').unwrap_or((value, ""));
	if int_part.is_empty() && frac_part.is_empty() {
		return Err(invalid());
	}
	if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
	{
		return Err(invalid());
	}

	let decimals_usize = decimals as usize;
	let mut digits = String::with_capacity(int_part.len() + decimals_usize);
	digits.push_str(int_part);
	if frac_part.len() >= decimals_usize {
		digits.push_str(&frac_part[..decimals_usize]);
	} else {
		digits.push_str(frac_part);
		digits.extend(std::iter::repeat('0').take(decimals_usize - frac_part.len()));
	}

	let digits = digits.trim_start_matches('0');
	if digits.is_empty() {
		return Ok(Amount::ZERO);
	}

	U256::from_str_radix(digits, 10)
		.map(Amount)
		.map_err(|_| UnitsError::Overflow {
			value: value.to_string(),
			decimals,
		})
}

/// Render base units as a decimal string with exactly `decimals` fractional digits
pub fn from_base_units(amount: Amount, decimals: u8) -> String {
	let raw = amount.0.to_string();
	if decimals == 0 {
		return raw;
	}

	let decimals = decimals as usize;
	let padded = if raw.len() <= decimals {
		format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
	} else {
		raw
	};
	let split = padded.len() - decimals;
	format!("{}.{}", &padded[..split], &padded[split..])
}

/// Re-express an amount from one decimal precision in another, truncating
pub fn rescale(amount: Amount, from_decimals: u8, to_decimals: u8) -> Amount {
	if from_decimals == to_decimals {
		return amount;
	}
	if to_decimals > from_decimals {
		let factor = pow10((to_decimals - from_decimals) as u32);
		Amount(amount.0.saturating_mul(factor))
	} else {
		let factor = pow10((from_decimals - to_decimals) as u32);
		Amount(amount.0 / factor)
	}
}

/// `floor(amount * (1 - slippage))` for a slippage fraction in `[0, 1)`
pub fn apply_slippage(amount: Amount, slippage: Decimal) -> Result<Amount, UnitsError> {
	if slippage.is_sign_negative() || slippage >= Decimal::ONE {
		return Err(UnitsError::InvalidSlippage { value: slippage });
	}

	let keep = Decimal::ONE - slippage;
	// keep = mantissa / 10^scale with 0 < mantissa <= 10^scale
	let mantissa = U256::from(keep.mantissa() as u128);
	let denominator = pow10(keep.scale());

	// Split so that the intermediate product cannot overflow
	let quotient = amount.0 / denominator;
	let remainder = amount.0 % denominator;
	let floored = quotient * mantissa + (remainder * mantissa) / denominator;

	Ok(Amount(floored))
}
