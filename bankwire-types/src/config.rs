//! Configuration types shared across connectors and the facade.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounded exponential backoff for transient upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one (>= 1).
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds.
    pub min_backoff_ms: u64,
    /// Upper bound for any single delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Exponential factor applied after each failed attempt (>= 1).
    pub factor: u32,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_backoff_ms: 250,
            max_backoff_ms: 5_000,
            factor: 2,
            jitter_percent: 20,
        }
    }
}

impl RetryConfig {
    /// Configuration that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            min_backoff_ms: 0,
            max_backoff_ms: 0,
            factor: 1,
            jitter_percent: 0,
        }
    }

    /// Base delay (without jitter) before retry number `retry` (0-based).
    #[must_use]
    pub fn base_delay_ms(&self, retry: u32) -> u64 {
        let factor = u64::from(self.factor.max(1));
        let mut delay = self.min_backoff_ms;
        for _ in 0..retry {
            delay = delay.saturating_mul(factor);
            if delay >= self.max_backoff_ms {
                return self.max_backoff_ms;
            }
        }
        delay.min(self.max_backoff_ms)
    }
}

/// Per-provider HTTP transport settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Fixed per-call timeout.
    pub timeout: Duration,
    /// Retry policy for idempotent calls.
    pub retry: RetryConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

/// Settings of the aggregation facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for each provider's health probe.
    pub health_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            health_timeout: Duration::from_secs(10),
        }
    }
}
