//! bankwire-plaid
//!
//! Connector for Plaid, the North-American aggregator. Plaid authenticates
//! the integration with client credentials and each item with a caller-held
//! access token, so the connector owns no session state. Transactions are
//! read through `transactions/sync`, which returns every account of an item;
//! results are filtered to the requested account.
#![warn(missing_docs)]

/// Raw API seam and the production adapter backed by `reqwest`.
pub mod adapter;
/// Connection settings.
pub mod config;
/// Mapping to canonical entities.
pub mod transform;
/// Request and response bodies of the Plaid API.
pub mod types;

use std::sync::Arc;

use adapter::{PlaidApi, RealAdapter};
use async_trait::async_trait;
use bankwire_core::{
    Account, Balance, BankwireError, Capability, CursorPage, DeleteAccountRequest,
    GetAccountBalanceRequest, GetAccountsRequest, GetTransactionsRequest, Institution, Provider,
    ProviderId, RetryConfig, Transaction, paginate, paginate_cursor, require, with_retry,
};
use config::PlaidConfig;
use types::{
    LinkTokenCreateRequest, LinkTokenCreateResponse, LinkTransactions, LinkUser, PlaidInstitution,
    PublicTokenExchangeResponse,
};

/// Largest page Plaid serves for `transactions/sync` and `institutions/get`.
pub const PAGE_SIZE: usize = 500;

/// History requested when an item is linked.
pub const LINK_DAYS_REQUESTED: u32 = 730;

/// Public connector type.
pub struct PlaidConnector {
    api: Arc<dyn PlaidApi>,
    retry: RetryConfig,
    client_name: String,
    country_codes: Vec<String>,
}

impl PlaidConnector {
    /// Static provider identifier.
    pub const ID: ProviderId = ProviderId::Plaid;

    /// Build with a fresh HTTP client from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &PlaidConfig) -> Result<Self, BankwireError> {
        let adapter = RealAdapter::new(config)?;
        Ok(Self {
            api: Arc::new(adapter),
            retry: config.http.retry,
            client_name: config.client_name.clone(),
            country_codes: config.country_codes.clone(),
        })
    }

    /// For tests/injection: build on top of any [`PlaidApi`] with the default
    /// link settings of [`PlaidConfig::new`].
    pub fn from_adapter(api: Arc<dyn PlaidApi>) -> Self {
        let defaults = PlaidConfig::new("", "");
        Self {
            api,
            retry: defaults.http.retry,
            client_name: defaults.client_name,
            country_codes: defaults.country_codes,
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Create a Link token for `user_id` requesting the transactions product.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for a blank user id; propagates upstream failures.
    pub async fn link_token_create(
        &self,
        user_id: &str,
        language: Option<&str>,
    ) -> Result<LinkTokenCreateResponse, BankwireError> {
        let user_id = require(Self::ID, "userId", Some(user_id))?;
        let req = LinkTokenCreateRequest {
            client_name: self.client_name.clone(),
            products: vec!["transactions".to_string()],
            language: language
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or("en")
                .to_string(),
            country_codes: self.country_codes.clone(),
            transactions: LinkTransactions {
                days_requested: LINK_DAYS_REQUESTED,
            },
            user: LinkUser {
                client_user_id: user_id.to_string(),
            },
        };
        self.api
            .link_token_create(&req)
            .await
            .map_err(|e| e.with_capability(Capability::Link))
    }

    /// Swap a public token from Link for a long-lived item access token.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for a blank token; propagates upstream failures.
    pub async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<PublicTokenExchangeResponse, BankwireError> {
        let public_token = require(Self::ID, "publicToken", Some(public_token))?;
        self.api
            .exchange_public_token(public_token)
            .await
            .map_err(|e| e.with_capability(Capability::Link))
    }

    /// Every institution serving `country`, fetched in pages of 500.
    ///
    /// # Errors
    /// Propagates the first page failure after retries.
    pub async fn institutions(&self, country: &str) -> Result<Vec<PlaidInstitution>, BankwireError> {
        let country = require(Self::ID, "countryCode", Some(country))?;
        let countries = [country.to_ascii_uppercase()];
        paginate(&self.retry, PAGE_SIZE, |offset, count| {
            self.api.institutions_page(&countries, offset, count)
        })
        .await
    }

    async fn institution(&self, id: &str) -> Result<PlaidInstitution, BankwireError> {
        with_retry(&self.retry, || {
            self.api.institution_by_id(id, &self.country_codes)
        })
        .await
    }
}

#[async_trait]
impl Provider for PlaidConnector {
    fn id(&self) -> ProviderId {
        Self::ID
    }

    fn vendor(&self) -> &'static str {
        "Plaid"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bankwire::plaid::get_accounts", skip(self, req))
    )]
    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, BankwireError> {
        let GetAccountsRequest::Plaid {
            access_token,
            institution_id,
        } = req
        else {
            return Err(req.misrouted(Self::ID));
        };
        let token = require(Self::ID, "accessToken", Some(access_token.as_str()))?;
        let institution_id = require(Self::ID, "institutionId", Some(institution_id.as_str()))?;

        let (accounts, institution) = futures::try_join!(
            with_retry(&self.retry, || self.api.accounts(token, None)),
            self.institution(institution_id),
        )
        .map_err(|e| e.with_capability(Capability::Accounts))?;

        accounts
            .iter()
            .map(|a| transform::transform_account(a, Some(&institution)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_capability(Capability::Accounts))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::plaid::get_transactions",
            skip(self, req),
            fields(account_id = %req.account_id, latest = req.latest),
        )
    )]
    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, BankwireError> {
        let token = require(Self::ID, "accessToken", req.access_token.as_deref())?;
        let account_id = require(Self::ID, "accountId", Some(req.account_id.as_str()))?;
        let page_size = u32::try_from(PAGE_SIZE).unwrap_or(u32::MAX);

        let fetched = if req.latest {
            with_retry(&self.retry, || {
                self.api.transactions_sync(token, None, Some(page_size))
            })
            .await
            .map(|page| page.added)
        } else {
            paginate_cursor(Self::ID.as_str(), &self.retry, |cursor| async move {
                let page = self
                    .api
                    .transactions_sync(token, cursor.as_deref(), Some(page_size))
                    .await?;
                Ok::<_, BankwireError>(CursorPage {
                    items: page.added,
                    next_cursor: Some(page.next_cursor).filter(|c| !c.is_empty()),
                    has_more: page.has_more,
                })
            })
            .await
        };
        let added = fetched.map_err(|e| e.with_capability(Capability::Transactions))?;

        added
            .iter()
            .filter(|tx| tx.account_id == account_id)
            .map(|tx| transform::transform_transaction(tx, req.account_type))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_capability(Capability::Transactions))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::plaid::get_account_balance",
            skip(self, req),
            fields(account_id = %req.account_id),
        )
    )]
    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Option<Balance>, BankwireError> {
        let token = require(Self::ID, "accessToken", req.access_token.as_deref())?;
        let account_id = require(Self::ID, "accountId", Some(req.account_id.as_str()))?;
        let ids = [account_id.to_string()];

        let accounts = with_retry(&self.retry, || self.api.accounts(token, Some(ids.as_slice())))
            .await
            .map_err(|e| e.with_capability(Capability::Balance))?;

        match accounts.iter().find(|a| a.account_id == account_id) {
            Some(account) => transform::transform_balance(account)
                .map_err(|e| e.with_capability(Capability::Balance)),
            None => Ok(None),
        }
    }

    async fn get_health_check(&self) -> bool {
        match self.api.status().await {
            Ok(status) => status.is_operational(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "bankwire::plaid", error = %_e, "health check failed");
                false
            }
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bankwire::plaid::delete_account", skip(self, req))
    )]
    async fn delete_account(&self, req: &DeleteAccountRequest) -> Result<(), BankwireError> {
        let token = require(Self::ID, "accessToken", req.access_token.as_deref())?;
        self.api
            .item_remove(token)
            .await
            .map_err(|e| e.with_capability(Capability::DeleteAccount))
    }

    async fn get_institutions(
        &self,
        country_code: &str,
    ) -> Result<Vec<Institution>, BankwireError> {
        let list = self
            .institutions(country_code)
            .await
            .map_err(|e| e.with_capability(Capability::Institutions))?;
        Ok(list.iter().map(transform::transform_institution).collect())
    }
}
