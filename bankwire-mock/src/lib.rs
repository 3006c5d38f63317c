//! bankwire-mock
//!
//! Deterministic [`Provider`] for facade tests. Each operation follows a
//! [`MockBehavior`] (return a fixture, fail, or hang) and counts its calls;
//! the health probe can also be told to panic.
#![warn(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bankwire_core::{
    Account, Balance, BankwireError, Capability, DeleteAccountRequest, GetAccountBalanceRequest,
    GetAccountsRequest, GetTransactionsRequest, Institution, Provider, ProviderId, Transaction,
};
use tokio::sync::Mutex;

mod fixtures;

/// How a mocked operation behaves.
#[derive(Debug, Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(BankwireError),
    /// Never complete (simulate a stalled upstream).
    Hang,
}

/// How the mocked health probe behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthBehavior {
    /// Report healthy.
    #[default]
    Healthy,
    /// Report unhealthy.
    Unhealthy,
    /// Panic inside the probe.
    Panic,
    /// Never complete.
    Hang,
}

#[derive(Default)]
struct Counters {
    accounts: AtomicUsize,
    transactions: AtomicUsize,
    balance: AtomicUsize,
    health: AtomicUsize,
    delete: AtomicUsize,
    institutions: AtomicUsize,
}

/// Mock provider registered under any [`ProviderId`].
pub struct MockProvider {
    id: ProviderId,
    accounts: MockBehavior<Vec<Account>>,
    transactions: MockBehavior<Vec<Transaction>>,
    balance: MockBehavior<Option<Balance>>,
    institutions: Option<MockBehavior<Vec<Institution>>>,
    health: HealthBehavior,
    counters: Counters,
    deleted: Mutex<Vec<String>>,
}

impl MockProvider {
    /// Healthy provider serving fixture data for `id`.
    #[must_use]
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            accounts: MockBehavior::Return(fixtures::accounts(id)),
            transactions: MockBehavior::Return(fixtures::transactions(id)),
            balance: MockBehavior::Return(Some(fixtures::balance(id))),
            institutions: Some(MockBehavior::Return(vec![fixtures::institution(id)])),
            health: HealthBehavior::Healthy,
            counters: Counters::default(),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Override `get_accounts`.
    #[must_use]
    pub fn accounts(mut self, behavior: MockBehavior<Vec<Account>>) -> Self {
        self.accounts = behavior;
        self
    }

    /// Override `get_transactions`.
    #[must_use]
    pub fn transactions(mut self, behavior: MockBehavior<Vec<Transaction>>) -> Self {
        self.transactions = behavior;
        self
    }

    /// Override `get_account_balance`.
    #[must_use]
    pub fn balance(mut self, behavior: MockBehavior<Option<Balance>>) -> Self {
        self.balance = behavior;
        self
    }

    /// Override `get_institutions`; `None` reports the capability as unsupported.
    #[must_use]
    pub fn institutions(mut self, behavior: Option<MockBehavior<Vec<Institution>>>) -> Self {
        self.institutions = behavior;
        self
    }

    /// Override the health probe.
    #[must_use]
    pub const fn health(mut self, behavior: HealthBehavior) -> Self {
        self.health = behavior;
        self
    }

    /// Number of calls made to the operation labelled `capability`.
    #[must_use]
    pub fn calls(&self, capability: Capability) -> usize {
        let counter = match capability {
            Capability::Accounts => &self.counters.accounts,
            Capability::Transactions => &self.counters.transactions,
            Capability::Balance => &self.counters.balance,
            Capability::HealthCheck => &self.counters.health,
            Capability::DeleteAccount => &self.counters.delete,
            Capability::Institutions => &self.counters.institutions,
            _ => return 0,
        };
        counter.load(Ordering::SeqCst)
    }

    /// Account ids passed to `delete_account`, in call order.
    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.lock().await.clone()
    }

    async fn play<T: Clone>(
        behavior: &MockBehavior<T>,
        counter: &AtomicUsize,
    ) -> Result<T, BankwireError> {
        counter.fetch_add(1, Ordering::SeqCst);
        match behavior {
            MockBehavior::Return(v) => Ok(v.clone()),
            MockBehavior::Fail(e) => Err(e.clone()),
            MockBehavior::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, BankwireError> {
        let _ = req;
        Self::play(&self.accounts, &self.counters.accounts).await
    }

    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, BankwireError> {
        let _ = req;
        Self::play(&self.transactions, &self.counters.transactions).await
    }

    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Option<Balance>, BankwireError> {
        let _ = req;
        Self::play(&self.balance, &self.counters.balance).await
    }

    async fn get_health_check(&self) -> bool {
        self.counters.health.fetch_add(1, Ordering::SeqCst);
        match self.health {
            HealthBehavior::Healthy => true,
            HealthBehavior::Unhealthy => false,
            HealthBehavior::Panic => panic!("mock health probe for {} panicked", self.id),
            HealthBehavior::Hang => std::future::pending().await,
        }
    }

    async fn delete_account(&self, req: &DeleteAccountRequest) -> Result<(), BankwireError> {
        self.counters.delete.fetch_add(1, Ordering::SeqCst);
        self.deleted.lock().await.push(req.account_id.clone());
        Ok(())
    }

    async fn get_institutions(
        &self,
        country_code: &str,
    ) -> Result<Vec<Institution>, BankwireError> {
        let _ = country_code;
        match &self.institutions {
            Some(behavior) => Self::play(behavior, &self.counters.institutions).await,
            None => Err(BankwireError::unsupported(Capability::Institutions)),
        }
    }
}
