//! Security-related HTTP response headers for a JSON-only API

use axum::{
	http::header::{HeaderName, HeaderValue},
	Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Headers applied to every response unless a handler already set them.
///
/// Quotes go stale within seconds, so responses are never stored by caches.
const SECURITY_HEADERS: &[(&str, &str)] = &[
	("strict-transport-security", "max-age=31536000; includeSubDomains"),
	("x-content-type-options", "nosniff"),
	("x-frame-options", "DENY"),
	("referrer-policy", "no-referrer"),
	("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
	("cache-control", "no-store"),
];

pub fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	SECURITY_HEADERS
		.iter()
		.fold(router, |router, &(name, value)| {
			router.layer(SetResponseHeaderLayer::if_not_present(
				HeaderName::from_static(name),
				HeaderValue::from_static(value),
			))
		})
}
