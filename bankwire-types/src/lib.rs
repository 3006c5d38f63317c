//! Canonical, provider-agnostic data transfer objects and configuration
//! primitives for the bankwire ecosystem.
#![warn(missing_docs)]

mod account;
mod capability;
mod config;
mod error;
mod provider;
mod transaction;

pub use account::{Account, AccountType, Balance, Institution};
pub use capability::Capability;
pub use config::{EngineConfig, HttpConfig, RetryConfig};
pub use error::BankwireError;
pub use provider::ProviderId;
pub use transaction::{Transaction, TransactionMethod, TransactionStatus};
