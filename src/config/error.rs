//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid site URL: {0}")]
    InvalidSiteUrl(String),

    #[error("Invalid gateway URL: {0}")]
    InvalidGatewayUrl(String),

    #[error("Broker host cannot be blank")]
    BlankBrokerHost,

    #[error("Invalid broker port")]
    InvalidBrokerPort,

    #[error("Connect timeout must be between 1 and {max} seconds, got {actual}")]
    InvalidConnectTimeout { max: u64, actual: u64 },
}
