use core::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::{BankwireError, ProviderId};

/// Structured key for the shared credential cache.
///
/// Keys carry the provider so several providers can share one namespace
/// without colliding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Bearer access token of a provider session.
    AccessToken {
        /// Owning provider.
        provider: ProviderId,
    },
    /// Refresh token of a provider session.
    RefreshToken {
        /// Owning provider.
        provider: ProviderId,
    },
    /// Serialized institution directory for a country.
    Institutions {
        /// Owning provider.
        provider: ProviderId,
        /// Upper-cased country code, if the listing was filtered by country.
        country: Option<String>,
    },
}

impl CacheKey {
    /// Access token key for `provider`.
    #[must_use]
    pub const fn access_token(provider: ProviderId) -> Self {
        Self::AccessToken { provider }
    }

    /// Refresh token key for `provider`.
    #[must_use]
    pub const fn refresh_token(provider: ProviderId) -> Self {
        Self::RefreshToken { provider }
    }

    /// Institution directory key; the country code is normalized to upper case.
    #[must_use]
    pub fn institutions(provider: ProviderId, country: Option<&str>) -> Self {
        Self::Institutions {
            provider,
            country: country
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_ascii_uppercase),
        }
    }

    /// Provider owning the entry.
    #[must_use]
    pub const fn provider(&self) -> ProviderId {
        match self {
            Self::AccessToken { provider }
            | Self::RefreshToken { provider }
            | Self::Institutions { provider, .. } => *provider,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessToken { provider } => write!(f, "{provider}:access_token"),
            Self::RefreshToken { provider } => write!(f, "{provider}:refresh_token"),
            Self::Institutions {
                provider,
                country: Some(c),
            } => write!(f, "{provider}:institutions:{c}"),
            Self::Institutions {
                provider,
                country: None,
            } => write!(f, "{provider}:institutions"),
        }
    }
}

/// Key-value store with per-entry expiry used for sessions and directories.
///
/// Implementations are expected to be TTL-consistent: an entry is never
/// returned after its TTL has elapsed.
#[async_trait]
pub trait CredentialCache: Send + Sync {
    /// Fetch a live entry.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, BankwireError>;

    /// Store `value` for `ttl`, replacing any previous entry.
    async fn put(&self, key: &CacheKey, value: String, ttl: Duration) -> Result<(), BankwireError>;

    /// Remove an entry. Removing a missing entry is not an error.
    async fn delete(&self, key: &CacheKey) -> Result<(), BankwireError>;
}

/// Write to the cache without waiting for completion.
///
/// Failures are logged and otherwise ignored, so a read path never fails
/// because a non-critical write did.
pub fn put_detached(cache: &Arc<dyn CredentialCache>, key: CacheKey, value: String, ttl: Duration) {
    let cache = Arc::clone(cache);
    tokio::spawn(async move {
        let result = cache.put(&key, value, ttl).await;
        #[cfg(feature = "tracing")]
        if let Err(e) = &result {
            tracing::warn!(target: "bankwire::cache", key = %key, error = %e, "detached cache write failed");
        }
        let _ = result;
    });
}
