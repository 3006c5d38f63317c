use core::fmt;

use bankwire_core::HttpConfig;
use serde::{Deserialize, Serialize};

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://bankaccountdata.gocardless.com";

/// Connection settings for GoCardless Bank Account Data.
///
/// `Debug` output redacts the secret pair.
#[derive(Clone, Serialize, Deserialize)]
pub struct GoCardLessConfig {
    /// Secret id issued in the GoCardless portal.
    pub secret_id: String,
    /// Secret key issued in the GoCardless portal.
    pub secret_key: String,
    /// API host; override for sandboxes and tests.
    pub base_url: String,
    /// Timeout and retry settings.
    pub http: HttpConfig,
}

impl GoCardLessConfig {
    /// Configuration against the production host with default transport settings.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpConfig::default(),
        }
    }

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

impl fmt::Debug for GoCardLessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoCardLessConfig")
            .field("secret_id", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("http", &self.http)
            .finish()
    }
}
