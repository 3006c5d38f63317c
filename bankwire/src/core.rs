use std::collections::BTreeMap;
use std::sync::Arc;

use bankwire_core::{
    Account, Balance, BankwireError, DeleteAccountRequest, EngineConfig, GetAccountBalanceRequest,
    GetAccountsRequest, GetTransactionsRequest, Institution, Provider, ProviderId, Transaction,
};

/// Facade that routes each call to the adapter registered for a provider.
pub struct Bankwire {
    pub(crate) providers: BTreeMap<ProviderId, Arc<dyn Provider>>,
    pub(crate) cfg: EngineConfig,
}

/// Builder for constructing a [`Bankwire`] facade.
#[derive(Default)]
pub struct BankwireBuilder {
    providers: Vec<Arc<dyn Provider>>,
    cfg: EngineConfig,
}

impl BankwireBuilder {
    /// Start with no providers and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own [`Provider::id`].
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Replace the facade settings.
    #[must_use]
    pub const fn config(mut self, cfg: EngineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Bound each provider's health probe.
    #[must_use]
    pub const fn health_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.health_timeout = timeout;
        self
    }

    /// Register the GoCardless connector built from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    #[cfg(feature = "gocardless")]
    pub fn gocardless(
        self,
        config: &bankwire_gocardless::config::GoCardLessConfig,
        cache: Arc<dyn bankwire_core::CredentialCache>,
    ) -> Result<Self, BankwireError> {
        let connector = bankwire_gocardless::GoCardLessConnector::new(config, cache)?;
        Ok(self.with_provider(Arc::new(connector)))
    }

    /// Register the Plaid connector built from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    #[cfg(feature = "plaid")]
    pub fn plaid(self, config: &bankwire_plaid::config::PlaidConfig) -> Result<Self, BankwireError> {
        let connector = bankwire_plaid::PlaidConnector::new(config)?;
        Ok(self.with_provider(Arc::new(connector)))
    }

    /// Register the Teller connector built from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    #[cfg(feature = "teller")]
    pub fn teller(
        self,
        config: &bankwire_teller::config::TellerConfig,
    ) -> Result<Self, BankwireError> {
        let connector = bankwire_teller::TellerConnector::new(config)?;
        Ok(self.with_provider(Arc::new(connector)))
    }

    /// Build the facade.
    ///
    /// # Errors
    /// Returns `InvalidRequest` if no provider was registered or two adapters
    /// report the same [`ProviderId`].
    pub fn build(self) -> Result<Bankwire, BankwireError> {
        if self.providers.is_empty() {
            return Err(BankwireError::invalid_request(
                "bankwire",
                "no providers registered; add at least one via with_provider(...)",
            ));
        }

        let mut providers = BTreeMap::new();
        for p in self.providers {
            let id = p.id();
            if providers.insert(id, p).is_some() {
                return Err(BankwireError::invalid_request(
                    id.as_str(),
                    "provider registered twice",
                ));
            }
        }

        Ok(Bankwire {
            providers,
            cfg: self.cfg,
        })
    }
}

impl Bankwire {
    /// Start building a new `Bankwire` instance.
    #[must_use]
    pub fn builder() -> BankwireBuilder {
        BankwireBuilder::new()
    }

    /// Identifiers of the registered providers, in stable order.
    pub fn providers(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.providers.keys().copied()
    }

    /// Facade settings in effect.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Adapter registered for `id`.
    ///
    /// # Errors
    /// Returns `NotRegistered` when no adapter was registered for `id`.
    pub fn provider(&self, id: ProviderId) -> Result<&Arc<dyn Provider>, BankwireError> {
        self.providers
            .get(&id)
            .ok_or_else(|| BankwireError::not_registered(id.as_str()))
    }

    /// Accounts linked to the consent grant described by `req`.
    ///
    /// # Errors
    /// Returns `NotRegistered` for an unknown provider, otherwise whatever the
    /// adapter reports.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bankwire::core::get_accounts", skip(self, req), fields(provider = %provider))
    )]
    pub async fn get_accounts(
        &self,
        provider: ProviderId,
        req: &GetAccountsRequest,
    ) -> Result<Vec<Account>, BankwireError> {
        self.provider(provider)?.get_accounts(req).await
    }

    /// Transactions of one account.
    ///
    /// # Errors
    /// Returns `NotRegistered` for an unknown provider, otherwise whatever the
    /// adapter reports.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::core::get_transactions",
            skip(self, req),
            fields(provider = %provider, account_id = %req.account_id, latest = req.latest),
        )
    )]
    pub async fn get_transactions(
        &self,
        provider: ProviderId,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, BankwireError> {
        self.provider(provider)?.get_transactions(req).await
    }

    /// Current available balance of one account.
    ///
    /// # Errors
    /// Returns `NotRegistered` for an unknown provider, otherwise whatever the
    /// adapter reports.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::core::get_account_balance",
            skip(self, req),
            fields(provider = %provider, account_id = %req.account_id),
        )
    )]
    pub async fn get_account_balance(
        &self,
        provider: ProviderId,
        req: &GetAccountBalanceRequest,
    ) -> Result<Option<Balance>, BankwireError> {
        self.provider(provider)?.get_account_balance(req).await
    }

    /// Revoke a consent grant upstream.
    ///
    /// # Errors
    /// Returns `NotRegistered` for an unknown provider, otherwise whatever the
    /// adapter reports.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "bankwire::core::delete_account",
            skip(self, req),
            fields(provider = %provider, account_id = %req.account_id),
        )
    )]
    pub async fn delete_account(
        &self,
        provider: ProviderId,
        req: &DeleteAccountRequest,
    ) -> Result<(), BankwireError> {
        self.provider(provider)?.delete_account(req).await
    }

    /// Institution directory of one provider for a country.
    ///
    /// # Errors
    /// Returns `NotRegistered` for an unknown provider and `Unsupported` when
    /// the provider has no directory.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bankwire::core::institutions", skip(self), fields(provider = %provider))
    )]
    pub async fn institutions(
        &self,
        provider: ProviderId,
        country_code: &str,
    ) -> Result<Vec<Institution>, BankwireError> {
        self.provider(provider)?.get_institutions(country_code).await
    }
}
