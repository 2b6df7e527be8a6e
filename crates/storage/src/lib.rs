//! xroute storage
//!
//! Route availability cache and the clocks it is driven by.

pub mod clock;
pub mod route_cache;
pub mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use route_cache::{RouteAvailabilityCache, DEFAULT_AVAILABILITY_TTL_SECS};
pub use traits::AvailabilityCache;
