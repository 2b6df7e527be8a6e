//! Error types for aggregator calls and their failure classification

use thiserror::Error;

/// How a failed aggregator call should be treated by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
	/// Malformed or missing parameters (HTTP 400 and other 4xx)
	Validation,
	/// The route is confirmed absent (HTTP 422); safe to cache
	UnsupportedRoute,
	/// Timeout, connection failure or 5xx; never cached, safe to retry
	TransientNetwork,
	/// Response shape was not what we expected; treated like a transient error
	ProviderData,
}

impl FailureKind {
	/// Only a definitive negative may be remembered
	pub fn is_cacheable(&self) -> bool {
		matches!(self, FailureKind::UnsupportedRoute)
	}
}

/// Aggregator operation errors
#[derive(Error, Debug)]
pub enum AggregatorError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Invalid request: {reason}")]
	InvalidRequest { reason: String },

	#[error("Connection error: {0}")]
	Connection(String),
}

pub type AggregatorResult<T> = Result<T, AggregatorError>;

impl AggregatorError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AggregatorError::HttpStatusError { status_code, .. } => Some(*status_code),
			AggregatorError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			422 => "Unprocessable Entity".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}

	/// Classify the failure
	pub fn kind(&self) -> FailureKind {
		match self {
			AggregatorError::Timeout { .. } | AggregatorError::Connection(_) => {
				FailureKind::TransientNetwork
			},
			AggregatorError::HttpStatusError { status_code, .. } => {
				Self::classify_status(*status_code)
			},
			AggregatorError::HttpError(e) => {
				if e.is_timeout() || e.is_connect() || e.is_request() {
					FailureKind::TransientNetwork
				} else if let Some(status) = e.status() {
					Self::classify_status(status.as_u16())
				} else if e.is_decode() {
					FailureKind::ProviderData
				} else {
					FailureKind::TransientNetwork
				}
			},
			AggregatorError::InvalidResponse { .. } => FailureKind::ProviderData,
			AggregatorError::InvalidRequest { .. } => FailureKind::Validation,
		}
	}

	fn classify_status(status_code: u16) -> FailureKind {
		match status_code {
			422 => FailureKind::UnsupportedRoute,
			408 | 429 => FailureKind::TransientNetwork,
			400..=499 => FailureKind::Validation,
			_ => FailureKind::TransientNetwork,
		}
	}
}
