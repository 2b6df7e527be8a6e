//! xroute API
//!
//! Axum-based HTTP surface for the bridge route engine.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use router::create_router;
pub use state::AppState;
