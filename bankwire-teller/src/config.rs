use bankwire_core::HttpConfig;
use serde::{Deserialize, Serialize};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.teller.io";

/// Connection settings for Teller.
///
/// Teller authenticates the integration with a client certificate. Callers
/// configure the identity on a `reqwest::Client` and hand it to
/// [`crate::TellerConnector::with_client`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerConfig {
    /// API host; override for tests.
    pub base_url: String,
    /// Timeout and retry settings.
    pub http: HttpConfig,
}

impl Default for TellerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl TellerConfig {
    /// Point the client at another host.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace the transport settings.
    #[must_use]
    pub const fn http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }
}
