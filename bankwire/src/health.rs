use std::collections::BTreeMap;

use bankwire_core::ProviderId;
use futures::future::join_all;

use crate::core::Bankwire;

/// Outcome of one provider's health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderHealth {
    /// The probe reported the upstream reachable.
    Healthy,
    /// The probe reported the upstream unreachable.
    Unhealthy,
    /// The probe did not finish within `health_timeout`.
    TimedOut,
    /// The probe panicked.
    Panicked,
}

impl ProviderHealth {
    /// Whether the provider can serve requests.
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Health of every registered provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthReport {
    /// Probe outcome per provider.
    pub providers: BTreeMap<ProviderId, ProviderHealth>,
}

impl HealthReport {
    /// True when every probed provider is healthy.
    #[must_use]
    pub fn all_healthy(&self) -> bool {
        self.providers.values().all(|h| h.is_healthy())
    }

    /// Outcome for one provider, if it was probed.
    #[must_use]
    pub fn get(&self, id: ProviderId) -> Option<ProviderHealth> {
        self.providers.get(&id).copied()
    }
}

impl Bankwire {
    /// Probe every registered provider concurrently.
    ///
    /// Each probe runs on its own task under `health_timeout`; a panic or a
    /// stall is reported for that provider only.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "bankwire::core::health", skip(self), fields(providers = self.providers.len()))
    )]
    pub async fn health(&self) -> HealthReport {
        let timeout = self.cfg.health_timeout;
        let probes = self.providers.iter().map(|(id, p)| {
            let id = *id;
            let p = p.clone();
            let handle = tokio::spawn(async move {
                tokio::time::timeout(timeout, p.get_health_check()).await
            });
            async move {
                let outcome = match handle.await {
                    Ok(Ok(true)) => ProviderHealth::Healthy,
                    Ok(Ok(false)) => ProviderHealth::Unhealthy,
                    Ok(Err(_elapsed)) => ProviderHealth::TimedOut,
                    Err(_join) => ProviderHealth::Panicked,
                };
                #[cfg(feature = "tracing")]
                if !outcome.is_healthy() {
                    tracing::warn!(target: "bankwire::core", provider = %id, ?outcome, "provider unhealthy");
                }
                (id, outcome)
            }
        });

        HealthReport {
            providers: join_all(probes).await.into_iter().collect(),
        }
    }
}
