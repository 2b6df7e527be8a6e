//! Configuration loading utilities

use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

use crate::settings::{ConfigValidationError, Settings};

/// Default config file location, without extension (toml, json and yaml are accepted)
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("Failed to load configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from the default file plus `XROUTE__*` environment overrides
///
/// e.g. `XROUTE__AGGREGATOR__TIMEOUT_MS=5000`
pub fn load_config() -> Result<Settings, ConfigError> {
	let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix("XROUTE")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	s.try_deserialize()
}

/// Load and validate in one step
pub fn load_validated_config() -> Result<Settings, ConfigLoadError> {
	let settings = load_config()?;
	settings.validate()?;
	Ok(settings)
}
