//! bankwire-teller
//!
//! Connector for Teller, the direct-bank aggregator. Every call carries the
//! caller's enrollment access token; the connector holds no session state
//! and there is no server-side grant to revoke.
#![warn(missing_docs)]

/// Raw API seam and the production adapter backed by `reqwest`.
pub mod adapter;
/// Connection settings.
pub mod config;
/// Mapping to canonical entities.
pub mod transform;
/// Wire types of the Teller API.
pub mod types;

use std::sync::Arc;

use adapter::{RealAdapter, TellerApi};
use async_trait::async_trait;
use bankwire_core::{
    Account, Balance, BankwireError, Capability, DeleteAccountRequest, GetAccountBalanceRequest,
    GetAccountsRequest, GetTransactionsRequest, Provider, ProviderId, Transaction, require,
};
use chrono::{Months, Utc};
use config::TellerConfig;

/// Public connector type.
pub struct TellerConnector {
    api: Arc<dyn TellerApi>,
}

impl TellerConnector {
    /// Static provider identifier.
    pub const ID: ProviderId = ProviderId::Teller;

    /// Build with a fresh HTTP client from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &TellerConfig) -> Result<Self, BankwireError> {
        Ok(Self::from_adapter(Arc::new(RealAdapter::new(config)?)))
    }

    /// Build on a caller-supplied client, e.g. one carrying the Teller
    /// client certificate.
    #[must_use]
    pub fn with_client(config: &TellerConfig, http: reqwest::Client) -> Self {
        Self::from_adapter(Arc::new(RealAdapter::with_client(config, http)))
    }

    /// For tests/injection: build on top of any [`TellerApi`].
    pub fn from_adapter(api: Arc<dyn TellerApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Provider for TellerConnector {
    fn id(&self) -> ProviderId {
        Self::ID
    }

    fn vendor(&self) -> &'static str {
        "Teller"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bankwire::teller::get_accounts", skip(self, req))
    )]
    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, BankwireError> {
        let GetAccountsRequest::Teller { access_token } = req else {
            return Err(req.misrouted(Self::ID));
        };
        let token = require(Self::ID, "accessToken", Some(access_token.as_str()))?;
        let accounts = self
            .api
            .accounts(token)
            .await
            .map_err(|e| e.with_capability(Capability::Accounts))?;
        Ok(accounts.iter().map(transform::transform_account).collect())
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::teller::get_transactions",
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

        let raw = self
            .api
            .transactions(token, account_id)
            .await
            .map_err(|e| e.with_capability(Capability::Transactions))?;
        let txs: Vec<Transaction> = raw
            .iter()
            .map(|tx| transform::transform_transaction(tx, req.account_type))
            .collect();

        if !req.latest {
            return Ok(txs);
        }
        match Utc::now().date_naive().checked_sub_months(Months::new(1)) {
            Some(from) => Ok(transform::since(txs, from)),
            None => Ok(txs),
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::teller::get_account_balance",
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

        let (account, balances) = futures::try_join!(
            self.api.account(token, account_id),
            self.api.balances(token, account_id)
        )
        .map_err(|e| e.with_capability(Capability::Balance))?;
        Ok(transform::transform_balance(&account, &balances))
    }

    async fn get_health_check(&self) -> bool {
        match self.api.health().await {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "bankwire::teller", error = %_e, "health check failed");
                false
            }
        }
    }

    async fn delete_account(&self, req: &DeleteAccountRequest) -> Result<(), BankwireError> {
        let _ = req;
        Ok(())
    }
}
