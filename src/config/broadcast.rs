//! Broadcast (gateway + broker) configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::error::ValidationError;
use crate::domain::broadcast::BroadcastOverrides;

/// Upper bound for the broker handshake timeout.
const MAX_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Broadcast configuration
///
/// Every connection field is optional; anything left unset falls back to
/// the defaults computed by the settings resolver.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    /// Real-time gateway URL handed to browser clients
    pub gateway_url: Option<String>,

    /// Broker hostname
    pub broker_host: Option<String>,

    /// Broker port
    pub broker_port: Option<u16>,

    /// Handshake timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Site secret mixed into the room key hash
    pub room_key_secret: Option<SecretString>,
}

impl BroadcastConfig {
    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// The explicit overrides handed to the settings resolver
    pub fn overrides(&self) -> BroadcastOverrides {
        BroadcastOverrides {
            gateway_url: self.gateway_url.clone(),
            broker_host: self.broker_host.clone(),
            broker_port: self.broker_port,
        }
    }

    /// Validate broadcast configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.gateway_url {
            let valid = Url::parse(url).is_ok_and(|parsed| {
                matches!(parsed.scheme(), "http" | "https" | "ws" | "wss")
                    && parsed.host_str().is_some_and(|host| !host.is_empty())
            });
            if !valid {
                return Err(ValidationError::InvalidGatewayUrl(url.clone()));
            }
        }
        if matches!(&self.broker_host, Some(host) if host.trim().is_empty()) {
            return Err(ValidationError::BlankBrokerHost);
        }
        if self.broker_port == Some(0) {
            return Err(ValidationError::InvalidBrokerPort);
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > MAX_CONNECT_TIMEOUT_SECS {
            return Err(ValidationError::InvalidConnectTimeout {
                max: MAX_CONNECT_TIMEOUT_SECS,
                actual: self.connect_timeout_secs,
            });
        }
        Ok(())
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            gateway_url: None,
            broker_host: None,
            broker_port: None,
            connect_timeout_secs: default_connect_timeout(),
            room_key_secret: None,
        }
    }
}

fn default_connect_timeout() -> u64 {
    2
}
