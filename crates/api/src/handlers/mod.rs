pub mod chains;
pub mod common;
pub mod health;
pub mod quotes;
pub mod routes;

pub use chains::{get_chains, get_tokens, resolve_token};
pub use health::{health, ready};
pub use quotes::post_quotes;
pub use routes::{get_route_availability, get_route_tokens};
