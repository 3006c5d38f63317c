//! bankwire-core
//!
//! Core contracts and utilities shared across the bankwire ecosystem.
//!
//! - `provider`: the `Provider` trait every upstream adapter implements.
//! - `request`: request records accepted by the contract.
//! - `cache`: the credential cache collaborator and its structured keys.
//! - `http`: retry, pagination and reqwest glue used by provider clients.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Backoff sleeps use `tokio::time`, and fire-and-forget cache writes are
//! spawned on the ambient runtime, so callers must run under Tokio 1.x.
//!
#![warn(missing_docs)]

/// Credential cache contract and structured cache keys.
pub mod cache;
/// Retry, pagination and HTTP response handling.
pub mod http;
/// The uniform provider contract.
pub mod provider;
/// Request records for the provider contract.
pub mod request;
pub mod types;

pub use cache::{CacheKey, CredentialCache};
pub use http::{CursorPage, paginate, paginate_cursor, with_retry};
pub use provider::Provider;
pub use request::{
    DeleteAccountRequest, GetAccountBalanceRequest, GetAccountsRequest, GetTransactionsRequest,
    require,
};
pub use types::*;
