//! Connection settings and their resolution from overrides + computed defaults.

use once_cell::sync::OnceCell;
use serde::Serialize;
use url::Url;

/// Port the real-time gateway listens on when no URL is configured.
pub const DEFAULT_GATEWAY_PORT: u16 = 3000;

/// Broker host used when none is configured.
pub const DEFAULT_BROKER_HOST: &str = "localhost";

/// Broker port used when none is configured.
pub const DEFAULT_BROKER_PORT: u16 = 6379;

/// Scheme and host of the site the bridge serves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOrigin {
    scheme: String,
    host: String,
}

impl SiteOrigin {
    /// Creates an origin from already separated parts.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Parses scheme and host out of an `http(s)://` URL.
    ///
    /// Any port, path, query or fragment is discarded. Returns `None` for
    /// malformed URLs, other schemes or a missing host.
    pub fn parse(url: &str) -> Option<Self> {
        let parsed = Url::parse(url.trim()).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        let host = parsed.host_str().filter(|host| !host.is_empty())?;

        Some(Self::new(parsed.scheme(), host))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Gateway URL assumed when none is configured: same scheme and host as
    /// the site, on the default gateway port.
    pub fn default_gateway_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, DEFAULT_GATEWAY_PORT)
    }
}

/// Explicitly configured values. Anything `None` (or blank) falls back to a
/// computed default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastOverrides {
    pub gateway_url: Option<String>,
    pub broker_host: Option<String>,
    pub broker_port: Option<u16>,
}

/// Fully resolved connection parameters. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSettings {
    pub gateway_url: String,
    pub broker_host: String,
    pub broker_port: u16,
}

impl ConnectionSettings {
    /// Broker address in `redis://host:port/` form.
    pub fn broker_url(&self) -> String {
        format!("redis://{}:{}/", self.broker_host, self.broker_port)
    }
}

/// Resolves [`ConnectionSettings`] once and hands out the cached value
/// on every later call.
#[derive(Debug)]
pub struct SettingsResolver {
    origin: SiteOrigin,
    overrides: BroadcastOverrides,
    resolved: OnceCell<ConnectionSettings>,
}

impl SettingsResolver {
    pub fn new(origin: SiteOrigin, overrides: BroadcastOverrides) -> Self {
        Self {
            origin,
            overrides,
            resolved: OnceCell::new(),
        }
    }

    /// Returns the settings, resolving them on first call.
    pub fn resolve(&self) -> &ConnectionSettings {
        self.resolved.get_or_init(|| self.compute())
    }

    /// True once [`resolve`](Self::resolve) has run.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    fn compute(&self) -> ConnectionSettings {
        let gateway_url = non_blank(&self.overrides.gateway_url)
            .unwrap_or_else(|| self.origin.default_gateway_url());
        let broker_host = non_blank(&self.overrides.broker_host)
            .unwrap_or_else(|| DEFAULT_BROKER_HOST.to_string());
        let broker_port = self.overrides.broker_port.unwrap_or(DEFAULT_BROKER_PORT);

        ConnectionSettings {
            gateway_url,
            broker_host,
            broker_port,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
