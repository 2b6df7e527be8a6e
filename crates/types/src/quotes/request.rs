//! Quote request parameters supplied by the caller

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::{QuoteError, QuoteValidationError};
use crate::models::{Amount, RouteKey};
use crate::units::{rescale, to_base_units};

/// Caller-facing parameters for a real transfer quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
	pub src_chain_key: String,
	pub src_token: String,
	pub dst_chain_key: String,
	pub dst_token: String,
	/// Human-readable source amount (e.g., "1.5")
	pub amount: String,
	pub src_decimals: u8,
	pub dst_decimals: u8,
	/// Slippage tolerance as a fraction (0.005 = 0.5%); service default when absent
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub slippage: Option<Decimal>,
	/// Sender on the source chain
	pub src_address: String,
	/// Receiver on the destination chain
	pub dst_address: String,
	/// Output the caller expects, in destination base units
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expected_output: Option<Amount>,
}

impl QuoteParams {
	pub fn route_key(&self) -> RouteKey {
		RouteKey::new(
			self.src_chain_key.clone(),
			self.src_token.clone(),
			self.dst_chain_key.clone(),
			self.dst_token.clone(),
		)
	}

	/// Validate required fields and slippage bounds
	pub fn validate(&self) -> Result<(), QuoteValidationError> {
		let required = [
			("srcChainKey", &self.src_chain_key),
			("srcToken", &self.src_token),
			("dstChainKey", &self.dst_chain_key),
			("dstToken", &self.dst_token),
			("amount", &self.amount),
			("srcAddress", &self.src_address),
			("dstAddress", &self.dst_address),
		];
		for (field, value) in required {
			if value.trim().is_empty() {
				return Err(QuoteValidationError::MissingRequiredField {
					field: field.to_string(),
				});
			}
		}

		for (field, value) in [("srcToken", &self.src_token), ("dstToken", &self.dst_token)] {
			if !value.starts_with("0x") {
				return Err(QuoteValidationError::InvalidTokenAddress {
					field: field.to_string(),
				});
			}
		}

		if let Some(slippage) = self.slippage {
			if slippage.is_sign_negative() || slippage >= Decimal::ONE {
				return Err(QuoteValidationError::InvalidSlippageTolerance { value: slippage });
			}
		}

		Ok(())
	}

	/// Source amount in base units (truncated)
	pub fn src_amount(&self) -> Result<Amount, QuoteError> {
		let amount = to_base_units(&self.amount, self.src_decimals)?;
		if amount.is_zero() {
			return Err(QuoteValidationError::InvalidAmount {
				field: "amount".to_string(),
				reason: "must be greater than zero".to_string(),
			}
			.into());
		}
		Ok(amount)
	}

	/// Output the minimum is derived from: the caller's expectation, or the source
	/// amount re-expressed in destination decimals
	pub fn requested_output(&self, src_amount: Amount) -> Amount {
		self.expected_output
			.unwrap_or_else(|| rescale(src_amount, self.src_decimals, self.dst_decimals))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	fn sample_params() -> QuoteParams {
		QuoteParams {
			src_chain_key: "ethereum".to_string(),
			src_token: "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE".to_string(),
			dst_chain_key: "arbitrum".to_string(),
			dst_token: "0xaf88d065e77c8cC2239327C5EDb3A432268e5831".to_string(),
			amount: "1.5".to_string(),
			src_decimals: 18,
			dst_decimals: 6,
			slippage: Some(dec!(0.005)),
			src_address: "0x742d35Cc6634C0532925a3b8D38BA2297C33A9D7".to_string(),
			dst_address: "0x742d35Cc6634C0532925a3b8D38BA2297C33A9D7".to_string(),
			expected_output: None,
		}
	}

	#[test]
	fn test_quote_params_amounts() {
		let params = sample_params();
		let src = params.src_amount().unwrap();
		assert_eq!(src, Amount::from(1_500_000_000_000_000_000u128));
		assert_eq!(params.requested_output(src), Amount::from(1_500_000u64));

		let params = QuoteParams {
			expected_output: Some(Amount::from(1_490_000u64)),
			..sample_params()
		};
		assert_eq!(params.requested_output(src), Amount::from(1_490_000u64));
	}

	#[test]
	fn test_quote_params_validation() {
		assert!(sample_params().validate().is_ok());

		let missing = QuoteParams {
			dst_address: " ".to_string(),
			..sample_params()
		};
		assert!(matches!(
			missing.validate(),
			Err(QuoteValidationError::MissingRequiredField { field }) if field == "dstAddress"
		));

		let slippage = QuoteParams {
			slippage: Some(dec!(1.2)),
			..sample_params()
		};
		assert!(matches!(
			slippage.validate(),
			Err(QuoteValidationError::InvalidSlippageTolerance { .. })
		));

		let token = QuoteParams {
			src_token: "USDC".to_string(),
			..sample_params()
		};
		assert!(token.validate().is_err());
	}

	#[test]
	fn test_zero_amount_rejected() {
		let params = QuoteParams {
			amount: "0.0000000000000000001".to_string(),
			..sample_params()
		};
		assert!(params.src_amount().is_err());
	}

	#[test]
	fn test_quote_params_deserialize_camel_case() {
		let json = r#"{
			"srcChainKey": "ethereum",
			"srcToken": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
			"dstChainKey": "arbitrum",
			"dstToken": "0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
			"amount": "100",
			"srcDecimals": 6,
			"dstDecimals": 6,
			"slippage": "0.01",
			"srcAddress": "0x742d35Cc6634C0532925a3b8D38BA2297C33A9D7",
			"dstAddress": "0x742d35Cc6634C0532925a3b8D38BA2297C33A9D7"
		}"#;
		let params: QuoteParams = serde_json::from_str(json).unwrap();
		assert_eq!(params.slippage, Some(dec!(0.01)));
		assert!(params.expected_output.is_none());
	}
}
