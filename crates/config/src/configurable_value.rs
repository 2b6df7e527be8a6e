//! Values that come either from the config file or from an environment variable

use serde::{Deserialize, Serialize};
use std::fmt;
use xroute_types::SecretString;

/// Either a literal value or the name of an environment variable holding it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name or the literal value
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	pub fn resolve_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		self.resolve().map(SecretString::new)
	}
}

// Never print plain secrets
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `"env:NAME"` reads from the environment, anything else is a literal
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		match value.strip_prefix("env:") {
			Some(env_var) => Self::from_env(env_var),
			None => Self::from_plain(value),
		}
	}
}
