use std::time::Duration;

use async_trait::async_trait;
use bankwire_core::http::{send_empty_once, send_json};
use bankwire_core::{BankwireError, RetryConfig, with_retry};
use serde::de::DeserializeOwned;

use crate::config::TellerConfig;
use crate::types::{TellerAccount, TellerBalances, TellerTransaction};

const PROVIDER: &str = "teller";

/// Raw Teller endpoints (so we can inject stubs in tests).
#[async_trait]
pub trait TellerApi: Send + Sync {
    /// Accounts of the enrollment behind `token`.
    async fn accounts(&self, token: &str) -> Result<Vec<TellerAccount>, BankwireError> {
        let _ = token;
        Err(BankwireError::unsupported("accounts"))
    }

    /// One account.
    async fn account(&self, token: &str, id: &str) -> Result<TellerAccount, BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("account"))
    }

    /// Live balances of one account.
    async fn balances(&self, token: &str, id: &str) -> Result<TellerBalances, BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("balances"))
    }

    /// Transactions of one account, newest first.
    async fn transactions(
        &self,
        token: &str,
        id: &str,
    ) -> Result<Vec<TellerTransaction>, BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("transactions"))
    }

    /// Probe API availability.
    async fn health(&self) -> Result<(), BankwireError> {
        Err(BankwireError::unsupported("health"))
    }
}

/// Real adapter backed by a `reqwest::Client`.
///
/// Requests authenticate with HTTP Basic, the access token as user name.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    retry: RetryConfig,
}

impl RealAdapter {
    /// Build an adapter with its own HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &TellerConfig) -> Result<Self, BankwireError> {
        let http = reqwest::Client::builder()
            .timeout(config.http.timeout)
            .build()
            .map_err(|e| BankwireError::invalid_request(PROVIDER, e.to_string()))?;
        Ok(Self::with_client(config, http))
    }

    /// Build on a caller-supplied client, e.g. one carrying a TLS identity.
    #[must_use]
    pub fn with_client(config: &TellerConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.http.timeout,
            retry: config.http.retry,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<T, BankwireError> {
        let url = format!("{}{path}", self.base_url);
        with_retry(&self.retry, || {
            send_json(
                PROVIDER,
                self.http
                    .get(&url)
                    .timeout(self.timeout)
                    .basic_auth(token, None::<&str>),
            )
        })
        .await
    }
}

#[async_trait]
impl TellerApi for RealAdapter {
    async fn accounts(&self, token: &str) -> Result<Vec<TellerAccount>, BankwireError> {
        self.get_json(token, "/accounts").await
    }

    async fn account(&self, token: &str, id: &str) -> Result<TellerAccount, BankwireError> {
        self.get_json(token, &format!("/accounts/{id}")).await
    }

    async fn balances(&self, token: &str, id: &str) -> Result<TellerBalances, BankwireError> {
        self.get_json(token, &format!("/accounts/{id}/balances")).await
    }

    async fn transactions(
        &self,
        token: &str,
        id: &str,
    ) -> Result<Vec<TellerTransaction>, BankwireError> {
        self.get_json(token, &format!("/accounts/{id}/transactions"))
            .await
    }

    async fn health(&self) -> Result<(), BankwireError> {
        let url = format!("{}/health", self.base_url);
        send_empty_once(PROVIDER, self.http.get(url).timeout(self.timeout)).await
    }
}
