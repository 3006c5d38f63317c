//! TTL-consistent in-memory cache backed by `moka`.
//!
//! Every entry carries its own TTL. Overwriting a key restarts its TTL with
//! the new value's duration, matching the semantics of external key-value
//! stores where `put` replaces both value and expiry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bankwire_core::{BankwireError, CacheKey, CredentialCache};
use moka::Expiry;
use moka::future::Cache;

const DEFAULT_MAX_ENTRIES: u64 = 10_000;

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<CacheKey, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Credential cache held in process memory.
///
/// Suitable for tests and single-process deployments; multi-instance
/// deployments should plug in a shared store implementing
/// [`CredentialCache`].
#[derive(Clone)]
pub struct MemoryCache {
    inner: Cache<CacheKey, Entry>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    /// Create a cache holding up to 10 000 entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Create a cache holding up to `max_entries` entries.
    #[must_use]
    pub fn with_capacity(max_entries: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries.max(1))
                .expire_after(PerEntryTtl)
                .build(),
        }
    }
}

#[async_trait]
impl CredentialCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, BankwireError> {
        Ok(self.inner.get(key).await.map(|e| e.value))
    }

    async fn put(&self, key: &CacheKey, value: String, ttl: Duration) -> Result<(), BankwireError> {
        if ttl.is_zero() {
            // An already-expired write behaves like a delete.
            self.inner.invalidate(key).await;
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "bankwire::cache", key = %key, ttl_s = ttl.as_secs(), "cache put");
        self.inner.insert(key.clone(), Entry { value, ttl }).await;
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), BankwireError> {
        self.inner.invalidate(key).await;
        Ok(())
    }
}
