//! Session token lifecycle for GoCardless.
//!
//! States, decided from two concurrent cache reads:
//! - access token cached: use it, no network round-trip;
//! - only the refresh token cached: refresh, overwrite the access entry and
//!   leave the refresh entry untouched;
//! - nothing cached: exchange the secret pair and cache both tokens.
//!
//! Cache entries live for the reported expiry minus one hour. Concurrent
//! cold-cache callers may each run an exchange; the last write wins and both
//! tokens stay valid, so no lock is taken.

use std::sync::Arc;
use std::time::Duration;

use bankwire_core::{BankwireError, CacheKey, CredentialCache, ProviderId};

use crate::adapter::GoCardLessApi;

/// Safety margin subtracted from reported token lifetimes.
pub const EXPIRY_MARGIN_SECS: u64 = 3600;

/// Cache TTL for a token reported to live `expires_in` seconds.
#[must_use]
pub fn ttl_with_margin(expires_in: i64) -> Duration {
    let secs = u64::try_from(expires_in).unwrap_or(0);
    Duration::from_secs(secs.saturating_sub(EXPIRY_MARGIN_SECS))
}

pub(crate) struct TokenManager {
    api: Arc<dyn GoCardLessApi>,
    cache: Arc<dyn CredentialCache>,
}

impl TokenManager {
    pub(crate) fn new(api: Arc<dyn GoCardLessApi>, cache: Arc<dyn CredentialCache>) -> Self {
        Self { api, cache }
    }

    fn access_key() -> CacheKey {
        CacheKey::access_token(ProviderId::GoCardLess)
    }

    fn refresh_key() -> CacheKey {
        CacheKey::refresh_token(ProviderId::GoCardLess)
    }

    /// Return a usable access token, refreshing or exchanging as needed.
    pub(crate) async fn access_token(&self) -> Result<String, BankwireError> {
        let access_key = Self::access_key();
        let refresh_key = Self::refresh_key();
        let (access, refresh) =
            tokio::join!(self.cache.get(&access_key), self.cache.get(&refresh_key));

        if let Some(token) = Self::cached(access) {
            return Ok(token);
        }

        if let Some(refresh) = Self::cached(refresh) {
            match self.refresh(&refresh).await {
                Ok(token) => return Ok(token),
                Err(e) if e.is_unauthorized() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(target: "bankwire::gocardless", "refresh token rejected, exchanging secrets");
                    let _ = self.cache.delete(&refresh_key).await;
                }
                Err(e) => return Err(e),
            }
        }

        self.exchange().await
    }

    /// Drop the cached access token so the next call refreshes or exchanges.
    pub(crate) async fn invalidate(&self) -> Result<(), BankwireError> {
        self.cache.delete(&Self::access_key()).await
    }

    fn cached(read: Result<Option<String>, BankwireError>) -> Option<String> {
        match read {
            Ok(v) => v.filter(|t| !t.is_empty()),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "bankwire::gocardless", error = %_e, "credential cache read failed, treating as miss");
                None
            }
        }
    }

    async fn refresh(&self, refresh: &str) -> Result<String, BankwireError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "bankwire::gocardless", "refreshing access token");
        let resp = self.api.refresh_token(refresh).await?;
        self.store(Self::access_key(), &resp.access, resp.access_expires)
            .await;
        Ok(resp.access)
    }

    async fn exchange(&self) -> Result<String, BankwireError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "bankwire::gocardless", "exchanging secrets for a new session");
        let resp = self.api.new_token().await?;
        tokio::join!(
            self.store(Self::access_key(), &resp.access, resp.access_expires),
            self.store(Self::refresh_key(), &resp.refresh, resp.refresh_expires),
        );
        Ok(resp.access)
    }

    async fn store(&self, key: CacheKey, token: &str, expires_in: i64) {
        let ttl = ttl_with_margin(expires_in);
        if ttl.is_zero() {
            return;
        }
        let result = self.cache.put(&key, token.to_string(), ttl).await;
        #[cfg(feature = "tracing")]
        if let Err(e) = &result {
            tracing::warn!(target: "bankwire::gocardless", key = %key, error = %e, "failed to cache token");
        }
        let _ = result;
    }
}
