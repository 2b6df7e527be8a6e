//! xroute configuration
//!
//! Settings, the static fallback catalog and startup utilities.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;
pub mod static_catalog;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, load_validated_config, ConfigLoadError};
pub use settings::{
	AggregatorSettings, ConfigValidationError, DiscoverySettings, LogFormat, LoggingSettings,
	QuoteSettings, ServerSettings, Settings,
};
pub use startup_logger::{
	log_engine_settings, log_service_info, log_service_shutdown, log_startup_complete,
};
pub use static_catalog::StaticCatalog;
