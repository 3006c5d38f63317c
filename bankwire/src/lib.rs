//! Bankwire gives uniform access to bank-connectivity providers.
//!
//! Overview
//! - Registers one adapter per [`ProviderId`] and dispatches each call to it.
//!   Adapters share the [`Provider`] contract, so the facade does no
//!   provider-specific branching beyond selection.
//! - Probes every registered provider's health concurrently; a probe that
//!   panics or stalls past `health_timeout` is reported unhealthy without
//!   affecting its siblings.
//! - Connector crates are re-exported behind the `gocardless`, `plaid` and
//!   `teller` features (all on by default).
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use bankwire::{Bankwire, GetAccountsRequest, ProviderId};
//! use bankwire::teller::{TellerConnector, config::TellerConfig};
//!
//! let bw = Bankwire::builder()
//!     .with_provider(Arc::new(TellerConnector::new(&TellerConfig::default())?))
//!     .build()?;
//!
//! let accounts = bw
//!     .get_accounts(
//!         ProviderId::Teller,
//!         &GetAccountsRequest::teller(token),
//!     )
//!     .await?;
//! let report = bw.health().await;
//! assert!(report.all_healthy());
//! ```
#![warn(missing_docs)]

mod core;
mod health;

pub use crate::core::{Bankwire, BankwireBuilder};
pub use crate::health::{HealthReport, ProviderHealth};

pub use bankwire_core::{
    Account, AccountType, Balance, BankwireError, CacheKey, Capability, CredentialCache,
    DeleteAccountRequest, EngineConfig, GetAccountBalanceRequest, GetAccountsRequest,
    GetTransactionsRequest, HttpConfig, Institution, Provider, ProviderId, RetryConfig,
    Transaction, TransactionMethod, TransactionStatus,
};

/// GoCardless Bank Account Data connector.
#[cfg(feature = "gocardless")]
pub use bankwire_gocardless as gocardless;
/// Plaid connector.
#[cfg(feature = "plaid")]
pub use bankwire_plaid as plaid;
/// Teller connector.
#[cfg(feature = "teller")]
pub use bankwire_teller as teller;
