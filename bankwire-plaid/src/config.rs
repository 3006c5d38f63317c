use core::fmt;

use bankwire_core::HttpConfig;
use serde::{Deserialize, Serialize};

/// Public status page polled by the health check.
pub const DEFAULT_STATUS_URL: &str = "https://status.plaid.com/api/v2/status.json";

/// Plaid deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaidEnvironment {
    /// Test credentials and fake institutions.
    #[default]
    Sandbox,
    /// Real institutions with a capped number of items.
    Development,
    /// Live traffic.
    Production,
}

impl PlaidEnvironment {
    /// API host of the environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://sandbox.plaid.com",
            Self::Development => "https://development.plaid.com",
            Self::Production => "https://production.plaid.com",
        }
    }
}

/// Connection settings for Plaid.
///
/// `Debug` output redacts the secret.
#[derive(Clone, Serialize, Deserialize)]
pub struct PlaidConfig {
    /// Client id from the Plaid dashboard.
    pub client_id: String,
    /// Secret for the selected environment.
    pub secret: String,
    /// Deployment to use.
    pub environment: PlaidEnvironment,
    /// Host override; takes precedence over `environment`.
    pub base_url: Option<String>,
    /// Status page URL for health checks.
    pub status_url: String,
    /// Name shown to end users in Link.
    pub client_name: String,
    /// Countries the integration is enabled for.
    pub country_codes: Vec<String>,
    /// Timeout and retry settings.
    pub http: HttpConfig,
}

impl PlaidConfig {
    /// Sandbox configuration with default transport settings.
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            environment: PlaidEnvironment::default(),
            base_url: None,
            status_url: DEFAULT_STATUS_URL.to_string(),
            client_name: "Bankwire".to_string(),
            country_codes: vec!["US".to_string(), "CA".to_string()],
            http: HttpConfig::default(),
        }
    }

    /// Select the deployment.
    #[must_use]
    pub const fn environment(mut self, env: PlaidEnvironment) -> Self {
        self.environment = env;
        self
    }

    /// Point the client at another host.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Poll another status page.
    #[must_use]
    pub fn status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    /// Replace the transport settings.
    #[must_use]
    pub const fn http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Host the adapter sends API calls to.
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }
}

impl fmt::Debug for PlaidConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaidConfig")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.resolved_base_url())
            .field("client_name", &self.client_name)
            .field("country_codes", &self.country_codes)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_environment() {
        let cfg = PlaidConfig::new("cid", "sec").environment(PlaidEnvironment::Production);
        assert_eq!(cfg.resolved_base_url(), "https://production.plaid.com");
        let cfg = cfg.base_url("http://127.0.0.1:9");
        assert_eq!(cfg.resolved_base_url(), "http://127.0.0.1:9");
    }

    #[test]
    fn debug_redacts_secret() {
        let out = format!("{:?}", PlaidConfig::new("cid", "top-secret"));
        assert!(!out.contains("top-secret"));
        assert!(out.contains("sandbox.plaid.com"));
    }
}
