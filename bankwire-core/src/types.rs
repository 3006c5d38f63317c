//! Re-export of foundational types from `bankwire-types`.
// Consolidated re-exports so downstream crates can depend on `bankwire-core` only

pub use bankwire_types::{
    Account, AccountType, Balance, BankwireError, Capability, EngineConfig, HttpConfig,
    Institution, ProviderId, RetryConfig, Transaction, TransactionMethod, TransactionStatus,
};

pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
