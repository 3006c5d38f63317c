//! bankwire-gocardless
//!
//! Connector for GoCardless Bank Account Data (formerly Nordigen), the
//! European open-banking aggregator. Owns the secret-exchange session
//! lifecycle, caches the bank directory per country and maps requisitions,
//! accounts, balances and transactions onto the canonical bankwire model.
#![warn(missing_docs)]

/// Raw API seam and the production adapter backed by `reqwest`.
pub mod adapter;
/// Connection settings.
pub mod config;
mod token;
/// Mapping to canonical entities.
pub mod transform;
/// Wire types of the GoCardless API.
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use adapter::{GoCardLessApi, RealAdapter};
use async_trait::async_trait;
use bankwire_core::cache::put_detached;
use bankwire_core::{
    Account, Balance, BankwireError, CacheKey, Capability, CredentialCache, DeleteAccountRequest,
    GetAccountBalanceRequest, GetAccountsRequest, GetTransactionsRequest, Institution, Provider,
    ProviderId, Transaction, TransactionStatus, require,
};
use chrono::{Months, NaiveDate, Utc};
use config::GoCardLessConfig;
use futures::future::try_join_all;
use token::TokenManager;
pub use token::{EXPIRY_MARGIN_SECS, ttl_with_margin};
use types::{
    AccountSnapshot, AgreementRequest, Bank, EndUserAgreement, Requisition, RequisitionList,
    RequisitionRequest,
};

/// How long a country's bank directory stays cached.
pub const INSTITUTIONS_TTL: Duration = Duration::from_secs(3600);

/// Consent validity requested for new end-user agreements.
pub const AGREEMENT_VALID_DAYS: u32 = 180;

/// Public connector type.
pub struct GoCardLessConnector {
    api: Arc<dyn GoCardLessApi>,
    cache: Arc<dyn CredentialCache>,
    tokens: TokenManager,
}

impl GoCardLessConnector {
    /// Static provider identifier.
    pub const ID: ProviderId = ProviderId::GoCardLess;

    /// Build with a fresh HTTP client from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        config: &GoCardLessConfig,
        cache: Arc<dyn CredentialCache>,
    ) -> Result<Self, BankwireError> {
        let adapter = RealAdapter::new(config)?;
        Ok(Self::from_adapter(Arc::new(adapter), cache))
    }

    /// For tests/injection: build on top of any [`GoCardLessApi`].
    pub fn from_adapter(api: Arc<dyn GoCardLessApi>, cache: Arc<dyn CredentialCache>) -> Self {
        Self {
            tokens: TokenManager::new(Arc::clone(&api), Arc::clone(&cache)),
            api,
            cache,
        }
    }

    /// Return a valid bearer token, reusing, refreshing or exchanging the session.
    ///
    /// # Errors
    /// Propagates exchange and refresh failures.
    pub async fn access_token(&self) -> Result<String, BankwireError> {
        self.tokens.access_token().await
    }

    /// Evict the cached access token, forcing the next call to renew it.
    ///
    /// # Errors
    /// Propagates cache failures.
    pub async fn invalidate_token(&self) -> Result<(), BankwireError> {
        self.tokens.invalidate().await
    }

    /// Run `op` with a bearer token. On 401 the token is evicted and `op`
    /// runs once more with a renewed one.
    async fn authorized<T, F, Fut>(&self, op: F) -> Result<T, BankwireError>
    where
        F: Fn(String) -> Fut,
        Fut: core::future::Future<Output = Result<T, BankwireError>>,
    {
        let token = self.tokens.access_token().await?;
        match op(token).await {
            Err(e) if e.is_unauthorized() => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "bankwire::gocardless", "access token rejected, renewing session");
                let _ = self.tokens.invalidate().await;
                let token = self.tokens.access_token().await?;
                op(token).await
            }
            other => other,
        }
    }

    /// Bank directory, optionally filtered by country; read-through cached for an hour.
    ///
    /// # Errors
    /// Propagates upstream failures on a cache miss.
    pub async fn institutions(&self, country: Option<&str>) -> Result<Vec<Bank>, BankwireError> {
        let key = CacheKey::institutions(Self::ID, country);
        if let Ok(Some(raw)) = self.cache.get(&key).await {
            match serde_json::from_str::<Vec<Bank>>(&raw) {
                Ok(banks) => return Ok(banks),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(target: "bankwire::gocardless", key = %key, error = %_e, "discarding unreadable bank directory");
                }
            }
        }

        let country = match &key {
            CacheKey::Institutions { country, .. } => country.clone(),
            _ => None,
        };
        let banks = self
            .authorized(|token| {
                let country = country.clone();
                async move { self.api.institutions(&token, country.as_deref()).await }
            })
            .await?;

        match serde_json::to_string(&banks) {
            Ok(raw) => put_detached(&self.cache, key, raw, INSTITUTIONS_TTL),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "bankwire::gocardless", error = %_e, "failed to serialize bank directory");
            }
        }
        Ok(banks)
    }

    /// Fetch one requisition.
    ///
    /// # Errors
    /// Propagates upstream failures.
    pub async fn requisition(&self, id: &str) -> Result<Requisition, BankwireError> {
        self.authorized(|token| async move { self.api.requisition(&token, id).await })
            .await
    }

    /// List requisitions of this integration.
    ///
    /// # Errors
    /// Propagates upstream failures.
    pub async fn requisitions(&self) -> Result<RequisitionList, BankwireError> {
        self.authorized(|token| async move { self.api.requisitions(&token).await })
            .await
    }

    /// Create an end-user agreement covering balances, details and transactions.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for a blank institution; propagates upstream failures.
    pub async fn create_end_user_agreement(
        &self,
        institution_id: &str,
        max_historical_days: u32,
    ) -> Result<EndUserAgreement, BankwireError> {
        let institution_id = require(Self::ID, "institutionId", Some(institution_id))?;
        let body = AgreementRequest {
            institution_id: institution_id.to_string(),
            access_scope: vec![
                "balances".to_string(),
                "details".to_string(),
                "transactions".to_string(),
            ],
            access_valid_for_days: AGREEMENT_VALID_DAYS,
            max_historical_days,
        };
        self.authorized(|token| {
            let body = &body;
            async move { self.api.create_agreement(&token, body).await }
        })
        .await
        .map_err(|e| e.with_capability(Capability::Link))
    }

    /// Create a requisition and return it with the consent link for the end user.
    ///
    /// # Errors
    /// Returns `InvalidRequest` for blank identifiers; propagates upstream failures.
    pub async fn build_link(
        &self,
        institution_id: &str,
        agreement: Option<&str>,
        redirect: &str,
    ) -> Result<Requisition, BankwireError> {
        let institution_id = require(Self::ID, "institutionId", Some(institution_id))?;
        let redirect = require(Self::ID, "redirect", Some(redirect))?;
        let body = RequisitionRequest {
            redirect: redirect.to_string(),
            institution_id: institution_id.to_string(),
            agreement: agreement
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
        };
        self.authorized(|token| {
            let body = &body;
            async move { self.api.create_requisition(&token, body).await }
        })
        .await
        .map_err(|e| e.with_capability(Capability::Link))
    }

    /// Account metadata and details fetched together; either failure fails the call.
    async fn account_snapshot(&self, id: &str) -> Result<AccountSnapshot, BankwireError> {
        self.authorized(|token| async move {
            let (metadata, details) = futures::try_join!(
                self.api.account(&token, id),
                self.api.account_details(&token, id)
            )?;
            Ok::<_, BankwireError>(AccountSnapshot { metadata, details })
        })
        .await
    }
}

fn one_month_ago() -> Option<NaiveDate> {
    Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(1))
}

#[async_trait]
impl Provider for GoCardLessConnector {
    fn id(&self) -> ProviderId {
        Self::ID
    }

    fn vendor(&self) -> &'static str {
        "GoCardless"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bankwire::gocardless::get_accounts", skip(self, req))
    )]
    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, BankwireError> {
        let GetAccountsRequest::GoCardLess { id, country_code } = req else {
            return Err(req.misrouted(Self::ID));
        };
        let id = require(Self::ID, "id", Some(id.as_str()))?;
        let country = require(Self::ID, "countryCode", Some(country_code.as_str()))?;

        // Settle the session before fanning out so concurrent branches share it.
        self.tokens.access_token().await?;

        let (banks, requisition) =
            futures::try_join!(self.institutions(Some(country)), self.requisition(id))
                .map_err(|e| e.with_capability(Capability::Accounts))?;

        let snapshots = try_join_all(
            requisition
                .accounts
                .iter()
                .map(|account_id| self.account_snapshot(account_id)),
        )
        .await
        .map_err(|e| e.with_capability(Capability::Accounts))?;

        snapshots
            .iter()
            .map(|snapshot| {
                let bank = banks
                    .iter()
                    .find(|b| b.id == snapshot.metadata.institution_id)
                    .or_else(|| {
                        let fallback = requisition.institution_id.as_deref()?;
                        banks.iter().find(|b| b.id == fallback)
                    });
                transform::transform_account(snapshot, bank)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_capability(Capability::Accounts))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::gocardless::get_transactions",
            skip(self, req),
            fields(account_id = %req.account_id, latest = req.latest),
        )
    )]
    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, BankwireError> {
        let account_id = require(Self::ID, "accountId", Some(req.account_id.as_str()))?;
        let date_from = if req.latest { one_month_ago() } else { None };

        let buckets = self
            .authorized(|token| async move {
                self.api.transactions(&token, account_id, date_from).await
            })
            .await
            .map_err(|e| e.with_capability(Capability::Transactions))?;

        let booked = buckets
            .booked
            .iter()
            .map(|tx| transform::transform_transaction(account_id, tx, TransactionStatus::Posted));
        let pending = buckets
            .pending
            .iter()
            .map(|tx| transform::transform_transaction(account_id, tx, TransactionStatus::Pending));
        booked
            .chain(pending)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.with_capability(Capability::Transactions))
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::gocardless::get_account_balance",
            skip(self, req),
            fields(account_id = %req.account_id),
        )
    )]
    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Option<Balance>, BankwireError> {
        let account_id = require(Self::ID, "accountId", Some(req.account_id.as_str()))?;
        let balances = self
            .authorized(|token| async move { self.api.balances(&token, account_id).await })
            .await
            .map_err(|e| e.with_capability(Capability::Balance))?;
        Ok(transform::transform_balance(&balances))
    }

    async fn get_health_check(&self) -> bool {
        match self.api.health().await {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "bankwire::gocardless", error = %_e, "health check failed");
                false
            }
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::gocardless::delete_account",
            skip(self, req),
            fields(requisition = %req.account_id),
        )
    )]
    async fn delete_account(&self, req: &DeleteAccountRequest) -> Result<(), BankwireError> {
        let requisition_id = require(Self::ID, "accountId", Some(req.account_id.as_str()))?;
        self.authorized(|token| async move {
            self.api.delete_requisition(&token, requisition_id).await
        })
        .await
        .map_err(|e| e.with_capability(Capability::DeleteAccount))
    }

    async fn get_institutions(
        &self,
        country_code: &str,
    ) -> Result<Vec<Institution>, BankwireError> {
        let country = require(Self::ID, "countryCode", Some(country_code))?;
        let banks = self
            .institutions(Some(country))
            .await
            .map_err(|e| e.with_capability(Capability::Institutions))?;
        Ok(banks.iter().map(transform::transform_institution).collect())
    }
}
