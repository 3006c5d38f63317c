mod helpers;

use std::sync::Arc;
use std::time::Duration;

use bankwire::{Bankwire, ProviderHealth, ProviderId};
use bankwire_mock::MockProvider;
use helpers::{HealthBehavior, facade, mocks};

#[tokio::test]
async fn all_healthy_when_every_probe_passes() {
    let mocks = mocks();
    let report = facade(&mocks).health().await;

    assert_eq!(report.providers.len(), 3);
    assert!(report.all_healthy());
    assert!(
        mocks
            .iter()
            .all(|m| m.calls(bankwire::Capability::HealthCheck) == 1)
    );
}

#[tokio::test]
async fn panicking_probe_does_not_abort_siblings() {
    let bw = Bankwire::builder()
        .with_provider(Arc::new(
            MockProvider::new(ProviderId::GoCardLess).health(HealthBehavior::Panic),
        ))
        .with_provider(Arc::new(MockProvider::new(ProviderId::Plaid)))
        .with_provider(Arc::new(
            MockProvider::new(ProviderId::Teller).health(HealthBehavior::Unhealthy),
        ))
        .build()
        .unwrap();

    let report = bw.health().await;

    assert_eq!(report.get(ProviderId::GoCardLess), Some(ProviderHealth::Panicked));
    assert_eq!(report.get(ProviderId::Plaid), Some(ProviderHealth::Healthy));
    assert_eq!(report.get(ProviderId::Teller), Some(ProviderHealth::Unhealthy));
    assert!(!report.all_healthy());
}

#[tokio::test(start_paused = true)]
async fn stalled_probe_times_out() {
    let bw = Bankwire::builder()
        .with_provider(Arc::new(
            MockProvider::new(ProviderId::Plaid).health(HealthBehavior::Hang),
        ))
        .with_provider(Arc::new(MockProvider::new(ProviderId::Teller)))
        .health_timeout(Duration::from_secs(3))
        .build()
        .unwrap();

    let started = tokio::time::Instant::now();
    let report = bw.health().await;

    assert_eq!(report.get(ProviderId::Plaid), Some(ProviderHealth::TimedOut));
    assert_eq!(report.get(ProviderId::Teller), Some(ProviderHealth::Healthy));
    assert!(started.elapsed() >= Duration::from_secs(3));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn unregistered_providers_are_absent_from_the_report() {
    let teller = Arc::new(MockProvider::new(ProviderId::Teller));
    let report = facade(&[teller]).health().await;

    assert_eq!(report.get(ProviderId::GoCardLess), None);
    assert!(report.all_healthy());
}
