//! xroute server
//!
//! Main entry point for the bridge route server

use xroute::BridgeBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	BridgeBuilder::new().start_server().await
}
