//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `LIVE_BRIDGE` prefix and nested values use double underscores as separators.
//!
//! Nothing is required: an empty environment yields a configuration whose
//! broadcast settings are all computed defaults.
//!
//! # Example
//!
//! ```no_run
//! use live_bridge::config::BridgeConfig;
//!
//! let config = BridgeConfig::load_validated().expect("Invalid configuration");
//! ```

mod broadcast;
mod error;
mod site;

pub use broadcast::BroadcastConfig;
pub use error::{ConfigError, ValidationError};
pub use site::SiteConfig;

use serde::Deserialize;

/// Root bridge configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BridgeConfig {
    /// Host site configuration (home URL)
    #[serde(default)]
    pub site: SiteConfig,

    /// Gateway and broker configuration
    #[serde(default)]
    pub broadcast: BroadcastConfig,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl BridgeConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `LIVE_BRIDGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `LIVE_BRIDGE__SITE__URL=https://example.com` -> `site.url`
    /// - `LIVE_BRIDGE__BROADCAST__BROKER_PORT=6380` -> `broadcast.broker_port`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("LIVE_BRIDGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.site.validate()?;
        self.broadcast.validate()?;
        Ok(())
    }

    /// Load configuration and validate it in one step
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` if values cannot be parsed and
    /// `ConfigError::ValidationFailed` if a parsed value is invalid.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}

fn default_log_level() -> String {
    "info,live_bridge=debug".to_string()
}
