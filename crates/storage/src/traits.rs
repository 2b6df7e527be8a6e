//! Cache trait consumed by route discovery

use xroute_types::{Availability, RouteKey};

/// Boolean availability verdicts per route
///
/// Implementations own their entries exclusively; callers only `get` and `set`.
/// Both operations are synchronous so no lock is ever held across an await point.
pub trait AvailabilityCache: Send + Sync {
	/// `Unknown` when absent or older than the TTL
	fn get(&self, key: &RouteKey) -> Availability;

	/// Record a verdict stamped with the current time
	fn set(&self, key: &RouteKey, available: bool);
}
