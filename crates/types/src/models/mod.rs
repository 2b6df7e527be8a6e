//! Shared domain models: chains, tokens, routes and amounts

pub mod amount;
pub mod chain;
pub mod route;
pub mod secret_string;
pub mod token;

pub use amount::Amount;
pub use chain::{ChainDescriptor, NativeCurrency};
pub use route::{Availability, KnownRoute, RouteAvailability, RouteKey};
pub use secret_string::SecretString;
pub use token::{addresses_equal, TokenDescriptor, NATIVE_TOKEN_ADDRESS};
