//! Configuration settings structures

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use xroute_types::{Amount, RankingPolicy, SecretString};

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use crate::static_catalog::StaticCatalog;

/// Startup configuration errors; any of these aborts the service
#[derive(Debug, Error)]
pub enum ConfigValidationError {
	#[error("Static chain catalog is empty")]
	EmptyCatalog,

	#[error("Static chain catalog lists chain '{key}' more than once")]
	DuplicateChain { key: String },

	#[error("Known route for {symbol} references unknown chain '{key}'")]
	UnknownRouteChain { symbol: String, key: String },

	#[error("Invalid aggregator base URL '{url}': {reason}")]
	InvalidBaseUrl { url: String, reason: String },

	#[error("Invalid setting {field}: {reason}")]
	InvalidValue { field: String, reason: String },

	#[error("Aggregator API key could not be resolved: {0}")]
	ApiKey(#[from] ConfigurableValueError),
}

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub aggregator: AggregatorSettings,
	pub discovery: DiscoverySettings,
	pub quotes: QuoteSettings,
	pub logging: LoggingSettings,
	pub catalog: StaticCatalog,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

/// Bridge aggregator connection
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AggregatorSettings {
	pub base_url: String,
	/// Client-side timeout for every outbound call; there are no retries
	pub timeout_ms: u64,
	pub api_key: Option<ConfigurableValue>,
	pub api_key_header: String,
}

impl Default for AggregatorSettings {
	fn default() -> Self {
		Self {
			base_url: "https://stargate.finance/api/v1".to_string(),
			timeout_ms: 10_000,
			api_key: None,
			api_key_header: "x-api-key".to_string(),
		}
	}
}

/// Route discovery tuning
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DiscoverySettings {
	/// Lifetime of both positive and negative availability verdicts
	pub availability_ttl_secs: u64,
	/// Nominal source amount (base units) used by probe quotes
	pub probe_amount: String,
	/// Placeholder sender/receiver used by probe quotes
	pub probe_address: String,
}

impl Default for DiscoverySettings {
	fn default() -> Self {
		Self {
			availability_ttl_secs: 300,
			probe_amount: "1000000".to_string(),
			probe_address: "0x000000000000000000000000000000000000dEaD".to_string(),
		}
	}
}

/// Quote defaults
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct QuoteSettings {
	/// Slippage applied when the caller gives none (fraction, 0.005 = 0.5%)
	pub default_slippage: Decimal,
	pub default_policy: RankingPolicy,
}

impl Default for QuoteSettings {
	fn default() -> Self {
		Self {
			default_slippage: Decimal::new(5, 3),
			default_policy: RankingPolicy::Fastest,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_millis(self.aggregator.timeout_ms)
	}

	pub fn availability_ttl(&self) -> chrono::Duration {
		chrono::Duration::seconds(self.discovery.availability_ttl_secs as i64)
	}

	pub fn probe_amount(&self) -> Result<Amount, ConfigValidationError> {
		Amount::parse(&self.discovery.probe_amount).map_err(|reason| {
			ConfigValidationError::InvalidValue {
				field: "discovery.probe_amount".to_string(),
				reason,
			}
		})
	}

	/// Resolve the optional aggregator API key
	pub fn api_key(&self) -> Result<Option<SecretString>, ConfigurableValueError> {
		self.aggregator
			.api_key
			.as_ref()
			.map(|value| value.resolve_secret())
			.transpose()
	}

	/// Check everything that must hold before the service starts
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		url::Url::parse(&self.aggregator.base_url).map_err(|e| {
			ConfigValidationError::InvalidBaseUrl {
				url: self.aggregator.base_url.clone(),
				reason: e.to_string(),
			}
		})?;

		if self.aggregator.timeout_ms == 0 {
			return Err(invalid("aggregator.timeout_ms", "must be greater than zero"));
		}
		if self.discovery.availability_ttl_secs == 0 {
			return Err(invalid(
				"discovery.availability_ttl_secs",
				"must be greater than zero",
			));
		}
		if self.probe_amount()?.is_zero() {
			return Err(invalid("discovery.probe_amount", "must be greater than zero"));
		}
		let slippage = self.quotes.default_slippage;
		if slippage.is_sign_negative() || slippage >= Decimal::ONE {
			return Err(invalid("quotes.default_slippage", "must be within [0, 1)"));
		}

		self.api_key()?;
		self.catalog.validate()
	}
}

fn invalid(field: &str, reason: &str) -> ConfigValidationError {
	ConfigValidationError::InvalidValue {
		field: field.to_string(),
		reason: reason.to_string(),
	}
}
