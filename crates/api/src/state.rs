use std::sync::Arc;

use xroute_service::BridgeServiceTrait;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub bridge_service: Arc<dyn BridgeServiceTrait>,
}

impl AppState {
	pub fn new(bridge_service: Arc<dyn BridgeServiceTrait>) -> Self {
		Self { bridge_service }
	}
}
