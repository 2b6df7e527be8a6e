//! In-memory route availability cache using DashMap with TTL support
//!
//! Positive and negative verdicts share one lifetime: a failing route is remembered
//! exactly as long as a working one. Expired entries are evicted lazily on read or by
//! an explicit [`RouteAvailabilityCache::purge_expired`] call; no background task runs.

use chrono::Duration;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;
use xroute_types::{Availability, RouteAvailability, RouteKey};

use crate::clock::{Clock, SystemClock};
use crate::traits::AvailabilityCache;

/// Default verdict lifetime
pub const DEFAULT_AVAILABILITY_TTL_SECS: i64 = 5 * 60;

#[derive(Debug, Clone)]
pub struct RouteAvailabilityCache {
	entries: Arc<DashMap<RouteKey, RouteAvailability>>,
	ttl: Duration,
	clock: Arc<dyn Clock>,
}

impl RouteAvailabilityCache {
	/// Cache with the default 5-minute TTL and the wall clock
	pub fn new() -> Self {
		Self::with_ttl(Duration::seconds(DEFAULT_AVAILABILITY_TTL_SECS))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self::with_clock(ttl, Arc::new(SystemClock))
	}

	pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
		Self {
			entries: Arc::new(DashMap::new()),
			ttl,
			clock,
		}
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Raw entry, expired or not
	pub fn entry(&self, key: &RouteKey) -> Option<RouteAvailability> {
		self.entries.get(key).map(|e| *e.value())
	}

	/// Remove all expired entries, returning how many were dropped
	pub fn purge_expired(&self) -> usize {
		let now = self.clock.now();
		let before = self.entries.len();
		self.entries
			.retain(|_, entry| !entry.is_expired(now, self.ttl));
		let removed = before.saturating_sub(self.entries.len());
		if removed > 0 {
			debug!("Purged {} expired route availability entries", removed);
		}
		removed
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn clear(&self) {
		self.entries.clear();
	}
}

impl Default for RouteAvailabilityCache {
	fn default() -> Self {
		Self::new()
	}
}

impl AvailabilityCache for RouteAvailabilityCache {
	fn get(&self, key: &RouteKey) -> Availability {
		// Copy out so the shard guard is released before any removal
		let Some(entry) = self.entry(key) else {
			return Availability::Unknown;
		};

		let now = self.clock.now();
		if entry.is_expired(now, self.ttl) {
			self.entries
				.remove_if(key, |_, current| current.is_expired(now, self.ttl));
			debug!("Route availability expired for {}", key);
			return Availability::Unknown;
		}

		Availability::from(entry.available)
	}

	fn set(&self, key: &RouteKey, available: bool) {
		let entry = RouteAvailability::new(available, self.clock.now());
		self.entries.insert(key.clone(), entry);
		debug!("Cached route availability {} = {}", key, available);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::clock::ManualClock;
	use chrono::Utc;

	fn route() -> RouteKey {
		RouteKey::new(
			"ethereum",
			"0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
			"arbitrum",
			"0xaf88d065e77c8cC2239327C5EDb3A432268e5831",
		)
	}

	fn cache_with_clock() -> (RouteAvailabilityCache, Arc<ManualClock>) {
		let clock = Arc::new(ManualClock::new(Utc::now()));
		let cache = RouteAvailabilityCache::with_clock(Duration::minutes(5), clock.clone());
		(cache, clock)
	}

	#[test]
	fn test_get_before_and_after_ttl() {
		for verdict in [true, false] {
			let (cache, clock) = cache_with_clock();
			cache.set(&route(), verdict);

			clock.advance(Duration::minutes(4) + Duration::seconds(59));
			assert_eq!(cache.get(&route()), Availability::from(verdict));

			clock.advance(Duration::seconds(2));
			assert_eq!(cache.get(&route()), Availability::Unknown);
			assert!(cache.entry(&route()).is_none(), "expired entry is evicted");
		}
	}

	#[test]
	fn test_unknown_when_absent() {
		let (cache, _) = cache_with_clock();
		assert_eq!(cache.get(&route()), Availability::Unknown);
		assert!(cache.is_empty());
	}

	#[test]
	fn test_lookup_ignores_address_case() {
		let (cache, _) = cache_with_clock();
		cache.set(&route(), true);

		let shouting = RouteKey::new(
			"ethereum",
			"0xA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48",
			"arbitrum",
			"0xAF88D065E77C8CC2239327C5EDB3A432268E5831",
		);
		assert_eq!(cache.get(&shouting), Availability::Available);
	}

	#[test]
	fn test_set_restamps_and_overwrites() {
		let (cache, clock) = cache_with_clock();
		cache.set(&route(), false);
		clock.advance(Duration::minutes(4));
		cache.set(&route(), true);
		clock.advance(Duration::minutes(4));

		assert_eq!(cache.get(&route()), Availability::Available);
		assert_eq!(cache.len(), 1);
	}

	#[test]
	fn test_purge_expired() {
		let (cache, clock) = cache_with_clock();
		let other = RouteKey::new("base", "0x1", "optimism", "0x2");

		cache.set(&route(), true);
		clock.advance(Duration::minutes(3));
		cache.set(&other, false);
		clock.advance(Duration::minutes(3));

		assert_eq!(cache.purge_expired(), 1);
		assert_eq!(cache.len(), 1);
		assert_eq!(cache.get(&other), Availability::Unavailable);

		cache.clear();
		assert!(cache.is_empty());
	}
}
