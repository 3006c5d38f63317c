use async_trait::async_trait;
use bankwire_core::http::{send_empty, send_empty_once, send_json, send_json_once, with_retry};
use bankwire_core::{BankwireError, NaiveDate, RetryConfig};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::json;

use crate::config::GoCardLessConfig;
use crate::types::{
    AccessTokenResponse, AccountDetails, AccountDetailsResponse, AccountMetadata, AgreementRequest,
    BalanceEntry, BalancesResponse, Bank, EndUserAgreement, RefreshTokenResponse, Requisition,
    RequisitionList, RequisitionRequest, TransactionBuckets, TransactionsResponse,
};

const PROVIDER: &str = "gocardless";

/// Raw GoCardless endpoints (so we can inject stubs in tests).
///
/// Data endpoints default to `unsupported` so stubs override only what they need.
#[async_trait]
pub trait GoCardLessApi: Send + Sync {
    /// Exchange the configured secret pair for a new session.
    async fn new_token(&self) -> Result<AccessTokenResponse, BankwireError> {
        Err(BankwireError::unsupported("token/new"))
    }

    /// Obtain a new access token from a refresh token.
    async fn refresh_token(&self, refresh: &str) -> Result<RefreshTokenResponse, BankwireError> {
        let _ = refresh;
        Err(BankwireError::unsupported("token/refresh"))
    }

    /// Probe API availability.
    async fn health(&self) -> Result<(), BankwireError> {
        Err(BankwireError::unsupported("health"))
    }

    /// Institution directory, optionally filtered by country.
    async fn institutions(
        &self,
        token: &str,
        country: Option<&str>,
    ) -> Result<Vec<Bank>, BankwireError> {
        let _ = (token, country);
        Err(BankwireError::unsupported("institutions"))
    }

    /// Fetch one requisition.
    async fn requisition(&self, token: &str, id: &str) -> Result<Requisition, BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("requisition"))
    }

    /// List requisitions.
    async fn requisitions(&self, token: &str) -> Result<RequisitionList, BankwireError> {
        let _ = token;
        Err(BankwireError::unsupported("requisitions"))
    }

    /// Delete a requisition and revoke its consent.
    async fn delete_requisition(&self, token: &str, id: &str) -> Result<(), BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("requisition/delete"))
    }

    /// Create a requisition (consent link).
    async fn create_requisition(
        &self,
        token: &str,
        req: &RequisitionRequest,
    ) -> Result<Requisition, BankwireError> {
        let _ = (token, req);
        Err(BankwireError::unsupported("requisition/create"))
    }

    /// Create an end-user agreement.
    async fn create_agreement(
        &self,
        token: &str,
        req: &AgreementRequest,
    ) -> Result<EndUserAgreement, BankwireError> {
        let _ = (token, req);
        Err(BankwireError::unsupported("agreement/create"))
    }

    /// Account metadata.
    async fn account(&self, token: &str, id: &str) -> Result<AccountMetadata, BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("account"))
    }

    /// Account details.
    async fn account_details(&self, token: &str, id: &str) -> Result<AccountDetails, BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("account/details"))
    }

    /// All balances of an account.
    async fn balances(&self, token: &str, id: &str) -> Result<Vec<BalanceEntry>, BankwireError> {
        let _ = (token, id);
        Err(BankwireError::unsupported("account/balances"))
    }

    /// Booked and pending transactions, optionally from a date on.
    async fn transactions(
        &self,
        token: &str,
        id: &str,
        date_from: Option<NaiveDate>,
    ) -> Result<TransactionBuckets, BankwireError> {
        let _ = (token, id, date_from);
        Err(BankwireError::unsupported("account/transactions"))
    }
}

/// Real adapter backed by a single `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base_url: String,
    secret_id: String,
    secret_key: String,
    retry: RetryConfig,
}

impl RealAdapter {
    /// Build an adapter with its own HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &GoCardLessConfig) -> Result<Self, BankwireError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(config.http.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| BankwireError::invalid_request(PROVIDER, e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_id: config.secret_id.clone(),
            secret_key: config.secret_key.clone(),
            retry: config.http.retry,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BankwireError> {
        let url = self.url(path);
        with_retry(&self.retry, || {
            send_json(
                PROVIDER,
                self.http.get(&url).bearer_auth(token).query(query),
            )
        })
        .await
    }
}

#[async_trait]
impl GoCardLessApi for RealAdapter {
    async fn new_token(&self) -> Result<AccessTokenResponse, BankwireError> {
        let body = json!({ "secret_id": self.secret_id, "secret_key": self.secret_key });
        send_json_once(
            PROVIDER,
            self.http.post(self.url("/api/v2/token/new/")).json(&body),
        )
        .await
    }

    async fn refresh_token(&self, refresh: &str) -> Result<RefreshTokenResponse, BankwireError> {
        let body = json!({ "refresh": refresh });
        send_json_once(
            PROVIDER,
            self.http.post(self.url("/api/v2/token/refresh/")).json(&body),
        )
        .await
    }

    async fn health(&self) -> Result<(), BankwireError> {
        send_empty_once(PROVIDER, self.http.get(self.url("/api/v2/swagger.json"))).await
    }

    async fn institutions(
        &self,
        token: &str,
        country: Option<&str>,
    ) -> Result<Vec<Bank>, BankwireError> {
        let query: Vec<(&str, String)> = country
            .map(|c| vec![("country", c.to_string())])
            .unwrap_or_default();
        self.get_json(token, "/api/v2/institutions/", &query).await
    }

    async fn requisition(&self, token: &str, id: &str) -> Result<Requisition, BankwireError> {
        self.get_json(token, &format!("/api/v2/requisitions/{id}/"), &[])
            .await
    }

    async fn requisitions(&self, token: &str) -> Result<RequisitionList, BankwireError> {
        self.get_json(token, "/api/v2/requisitions/", &[]).await
    }

    async fn delete_requisition(&self, token: &str, id: &str) -> Result<(), BankwireError> {
        let url = self.url(&format!("/api/v2/requisitions/{id}/"));
        with_retry(&self.retry, || {
            send_empty(PROVIDER, self.http.delete(&url).bearer_auth(token))
        })
        .await
    }

    async fn create_requisition(
        &self,
        token: &str,
        req: &RequisitionRequest,
    ) -> Result<Requisition, BankwireError> {
        send_json_once(
            PROVIDER,
            self.http
                .post(self.url("/api/v2/requisitions/"))
                .bearer_auth(token)
                .json(req),
        )
        .await
    }

    async fn create_agreement(
        &self,
        token: &str,
        req: &AgreementRequest,
    ) -> Result<EndUserAgreement, BankwireError> {
        send_json_once(
            PROVIDER,
            self.http
                .post(self.url("/api/v2/agreements/enduser/"))
                .bearer_auth(token)
                .json(req),
        )
        .await
    }

    async fn account(&self, token: &str, id: &str) -> Result<AccountMetadata, BankwireError> {
        self.get_json(token, &format!("/api/v2/accounts/{id}/"), &[])
            .await
    }

    async fn account_details(&self, token: &str, id: &str) -> Result<AccountDetails, BankwireError> {
        let resp: AccountDetailsResponse = self
            .get_json(token, &format!("/api/v2/accounts/{id}/details/"), &[])
            .await?;
        Ok(resp.account)
    }

    async fn balances(&self, token: &str, id: &str) -> Result<Vec<BalanceEntry>, BankwireError> {
        let resp: BalancesResponse = self
            .get_json(token, &format!("/api/v2/accounts/{id}/balances/"), &[])
            .await?;
        Ok(resp.balances)
    }

    async fn transactions(
        &self,
        token: &str,
        id: &str,
        date_from: Option<NaiveDate>,
    ) -> Result<TransactionBuckets, BankwireError> {
        let query: Vec<(&str, String)> = date_from
            .map(|d| vec![("date_from", d.format("%Y-%m-%d").to_string())])
            .unwrap_or_default();
        let resp: TransactionsResponse = self
            .get_json(token, &format!("/api/v2/accounts/{id}/transactions/"), &query)
            .await?;
        Ok(resp.transactions)
    }
}
