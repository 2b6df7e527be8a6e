use axum::{http::StatusCode, response::Json};
use serde::Serialize;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}),
	)
}

pub fn bad_request(error: &str, message: impl Into<String>) -> ApiError {
	error_response(StatusCode::BAD_REQUEST, error, message)
}

/// Reject blank query parameters with a named error
pub fn require_param<'a>(name: &str, value: &'a str) -> Result<&'a str, ApiError> {
	let value = value.trim();
	if value.is_empty() {
		return Err(bad_request(
			"VALIDATION_ERROR",
			format!("Missing required parameter: {}", name),
		));
	}
	Ok(value)
}
