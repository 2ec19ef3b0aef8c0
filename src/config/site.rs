//! Host site configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::broadcast::SiteOrigin;

/// Host site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Home URL of the host site (scheme and host feed the default gateway URL)
    #[serde(default = "default_url")]
    pub url: String,
}

impl SiteConfig {
    /// Parse the scheme and host out of the configured URL
    pub fn origin(&self) -> Result<SiteOrigin, ValidationError> {
        SiteOrigin::parse(&self.url).ok_or_else(|| ValidationError::InvalidSiteUrl(self.url.clone()))
    }

    /// Validate site configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SITE__URL"));
        }
        self.origin().map(|_| ())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

fn default_url() -> String {
    "http://localhost".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.url, "http://localhost");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_origin_from_https_url() {
        let config = SiteConfig {
            url: "https://example.com/blog/".to_string(),
        };
        let origin = config.origin().unwrap();
        assert_eq!(origin.scheme(), "https");
        assert_eq!(origin.host(), "example.com");
    }

    #[test]
    fn test_validation_empty_url() {
        let config = SiteConfig { url: "  ".to_string() };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("SITE__URL"))
        );
    }

    #[test]
    fn test_validation_rejects_non_http_scheme() {
        let config = SiteConfig {
            url: "ftp://example.com".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_malformed_host() {
        let config = SiteConfig {
            url: "http://exa mple.com/".to_string(),
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidSiteUrl("http://exa mple.com/".to_string()))
        );
    }
}
