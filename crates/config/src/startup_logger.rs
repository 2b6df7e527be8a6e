//! Service startup and shutdown banners

use std::env;
use tracing::info;

use crate::settings::Settings;

/// Logs service and environment information at startup
pub fn log_service_info() {
	info!("=== xroute Bridge Route Service Starting ===");
	info!("🚀 Service: xroute v{}", env!("CARGO_PKG_VERSION"));
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}
	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}
	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the effective engine configuration (secrets redacted)
pub fn log_engine_settings(settings: &Settings) {
	info!(
		"🌉 Aggregator: {} (timeout {}ms, api key: {})",
		settings.aggregator.base_url,
		settings.aggregator.timeout_ms,
		settings
			.aggregator
			.api_key
			.as_ref()
			.map(|v| v.to_string())
			.unwrap_or_else(|| "none".to_string())
	);
	info!(
		"🗂️ Route availability TTL: {}s, probe amount: {}",
		settings.discovery.availability_ttl_secs, settings.discovery.probe_amount
	);
	info!(
		"📚 Static catalog: {} chains, {} known routes",
		settings.catalog.chains.len(),
		settings.catalog.routes.len()
	);
}

pub fn log_service_shutdown() {
	info!("🛑 xroute Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_startup_complete(bind_address: &str) {
	info!("✅ xroute Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
}
