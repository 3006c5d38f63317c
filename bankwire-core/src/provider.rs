use async_trait::async_trait;

use crate::request::{
    DeleteAccountRequest, GetAccountBalanceRequest, GetAccountsRequest, GetTransactionsRequest,
};
use crate::{Account, Balance, BankwireError, Capability, Institution, ProviderId, Transaction};

/// Uniform contract implemented by every upstream adapter.
///
/// Adapters validate provider-specific request fields before any network
/// call and return canonical entities only.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which upstream this adapter talks to.
    fn id(&self) -> ProviderId;

    /// Stable identifier for logs and error messages.
    fn name(&self) -> &'static str {
        self.id().as_str()
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Accounts linked to the consent grant described by `req`.
    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, BankwireError>;

    /// Transactions of one account, normalized to the canonical sign convention.
    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, BankwireError>;

    /// Current available balance; `None` when the account reports none.
    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Option<Balance>, BankwireError>;

    /// Upstream availability. Never fails; any error reports `false`.
    async fn get_health_check(&self) -> bool;

    /// Revoke the consent grant upstream. No-op for providers without one.
    async fn delete_account(&self, req: &DeleteAccountRequest) -> Result<(), BankwireError>;

    /// Institution directory for a country.
    ///
    /// Default: unsupported.
    async fn get_institutions(
        &self,
        country_code: &str,
    ) -> Result<Vec<Institution>, BankwireError> {
        let _ = country_code;
        Err(BankwireError::unsupported(Capability::Institutions))
    }
}
