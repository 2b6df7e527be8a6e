//! Stargate REST wire models and their conversion into domain types

use rust_decimal::Decimal;
use serde::Deserialize;
use xroute_types::{
	AggregatorError, AggregatorResult, Amount, ChainDescriptor, Fee, FeeKind, NativeCurrency,
	Quote, StepKind, TokenDescriptor, TransactionStep,
};

#[derive(Debug, Deserialize)]
pub struct StargateChainsResponse {
	#[serde(default)]
	pub chains: Vec<StargateChain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateChain {
	pub chain_key: String,
	/// Absent for non-EVM chains
	#[serde(default)]
	pub chain_id: Option<u64>,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub short_name: Option<String>,
	pub native_currency: StargateNativeCurrency,
}

#[derive(Debug, Deserialize)]
pub struct StargateNativeCurrency {
	pub symbol: String,
	pub decimals: u8,
	#[serde(default)]
	pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StargateTokensResponse {
	#[serde(default)]
	pub tokens: Vec<StargateToken>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateToken {
	pub chain_key: String,
	pub address: String,
	pub decimals: u8,
	pub symbol: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default, alias = "bridgeable")]
	pub is_bridgeable: bool,
	#[serde(default)]
	pub price: Option<StargatePrice>,
}

#[derive(Debug, Deserialize)]
pub struct StargatePrice {
	#[serde(default)]
	pub usd: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct StargateQuotesResponse {
	pub quotes: Vec<StargateQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateQuote {
	#[serde(default)]
	pub route: Option<String>,
	#[serde(default)]
	pub error: Option<serde_json::Value>,
	pub src_amount: Amount,
	pub dst_amount: Amount,
	#[serde(default)]
	pub dst_amount_min: Option<Amount>,
	#[serde(default)]
	pub duration: Option<StargateDuration>,
	#[serde(default)]
	pub fees: Vec<StargateFee>,
	#[serde(default)]
	pub steps: Vec<StargateStep>,
}

#[derive(Debug, Deserialize)]
pub struct StargateDuration {
	/// Seconds; may be fractional
	#[serde(default)]
	pub estimated: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateFee {
	pub token: String,
	pub chain_key: String,
	pub amount: Amount,
	#[serde(rename = "type")]
	pub fee_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateStep {
	#[serde(rename = "type")]
	pub step_type: String,
	#[serde(default)]
	pub chain_key: Option<String>,
	pub transaction: StargateTransaction,
}

#[derive(Debug, Deserialize)]
pub struct StargateTransaction {
	pub to: String,
	#[serde(default)]
	pub data: String,
	#[serde(default)]
	pub value: Option<Amount>,
}

fn invalid(reason: String) -> AggregatorError {
	AggregatorError::InvalidResponse { reason }
}

impl StargateChain {
	/// `None` for chains without an EVM chain id
	pub fn into_descriptor(self) -> Option<ChainDescriptor> {
		let chain_id = self.chain_id?;
		let name = self
			.name
			.or(self.short_name)
			.unwrap_or_else(|| self.chain_key.clone());
		let mut native = NativeCurrency::new(self.native_currency.symbol, self.native_currency.decimals);
		if let Some(address) = self.native_currency.address {
			native.address = address;
		}
		Some(ChainDescriptor::new(self.chain_key, chain_id, name, native))
	}
}

impl From<StargateToken> for TokenDescriptor {
	fn from(token: StargateToken) -> Self {
		let mut descriptor = TokenDescriptor::new(
			token.chain_key,
			token.address,
			token.symbol,
			token.decimals,
			token.is_bridgeable,
		);
		descriptor.name = token.name;
		descriptor.price_usd = token.price.and_then(|p| p.usd);
		descriptor
	}
}

impl TryFrom<StargateFee> for Fee {
	type Error = AggregatorError;

	fn try_from(fee: StargateFee) -> AggregatorResult<Self> {
		let kind = match fee.fee_type.to_ascii_lowercase().as_str() {
			"message" => FeeKind::Message,
			"protocol" => FeeKind::Protocol,
			other => return Err(invalid(format!("unknown fee type '{}'", other))),
		};
		Ok(Fee {
			token_address: fee.token,
			amount: fee.amount,
			kind,
			chain_key: fee.chain_key,
		})
	}
}

impl TryFrom<StargateStep> for TransactionStep {
	type Error = AggregatorError;

	fn try_from(step: StargateStep) -> AggregatorResult<Self> {
		let kind = match step.step_type.to_ascii_lowercase().as_str() {
			"approve" => StepKind::Approve,
			"bridge" => StepKind::Bridge,
			other => return Err(invalid(format!("unknown step type '{}'", other))),
		};
		Ok(TransactionStep {
			kind,
			target_contract: step.transaction.to,
			call_data: step.transaction.data,
			native_value: step.transaction.value,
		})
	}
}

impl TryFrom<StargateQuote> for Quote {
	type Error = AggregatorError;

	fn try_from(quote: StargateQuote) -> AggregatorResult<Self> {
		if let Some(error) = quote.error.filter(|e| !e.is_null()) {
			return Err(invalid(format!("quote carries provider error: {}", error)));
		}

		let estimated = quote
			.duration
			.and_then(|d| d.estimated)
			.ok_or_else(|| invalid("quote is missing duration.estimated".to_string()))?;
		if !estimated.is_finite() || estimated < 0.0 {
			return Err(invalid(format!("invalid estimated duration {}", estimated)));
		}

		let fees = quote
			.fees
			.into_iter()
			.map(Fee::try_from)
			.collect::<AggregatorResult<Vec<_>>>()?;
		let steps = quote
			.steps
			.into_iter()
			.map(TransactionStep::try_from)
			.collect::<AggregatorResult<Vec<_>>>()?;

		// The engine recomputes the minimum from its own slippage
		let dst_amount_min = quote
			.dst_amount_min
			.unwrap_or(Amount::ZERO)
			.min(quote.dst_amount);

		let normalized = Quote {
			route_label: quote.route.unwrap_or_else(|| "unknown".to_string()),
			src_amount: quote.src_amount,
			dst_amount: quote.dst_amount,
			dst_amount_min,
			estimated_duration_seconds: estimated.ceil() as u64,
			fees,
			steps,
		};
		normalized
			.validate()
			.map_err(|e| invalid(format!("quote failed validation: {}", e)))?;

		Ok(normalized)
	}
}
