// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use bankwire::{Bankwire, ProviderId};
use bankwire_mock::MockProvider;

pub use bankwire_mock::{HealthBehavior, MockBehavior};

/// One healthy mock per known provider.
pub fn mocks() -> Vec<Arc<MockProvider>> {
    ProviderId::ALL
        .into_iter()
        .map(|id| Arc::new(MockProvider::new(id)))
        .collect()
}

/// Facade over the given mocks with default settings.
pub fn facade(mocks: &[Arc<MockProvider>]) -> Bankwire {
    mocks
        .iter()
        .fold(Bankwire::builder(), |b, m| b.with_provider(m.clone()))
        .build()
        .unwrap()
}
