// Shared stubs for connector tests: an in-memory API and a cache that records writes.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bankwire_core::{BankwireError, CacheKey, CredentialCache, NaiveDate, ProviderId};
use bankwire_gocardless::GoCardLessConnector;
use bankwire_gocardless::adapter::GoCardLessApi;
use bankwire_gocardless::types::{
    AccessTokenResponse, AccountDetails, AccountMetadata, BalanceEntry, Bank,
    RefreshTokenResponse, Requisition, RequisitionList, TransactionBuckets,
};

pub const ACCESS_EXPIRES: i64 = 86_400;
pub const REFRESH_EXPIRES: i64 = 2_592_000;
pub const BANK_ID: &str = "SANDBOXFINANCE_SFIN0000";

pub fn access_key() -> CacheKey {
    CacheKey::access_token(ProviderId::GoCardLess)
}

pub fn refresh_key() -> CacheKey {
    CacheKey::refresh_token(ProviderId::GoCardLess)
}

#[derive(Default)]
pub struct StubApi {
    pub new_token_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub institutions_calls: AtomicUsize,
    pub data_calls: AtomicUsize,
    /// Refresh fails with this status when set.
    pub refresh_status: Option<u16>,
    /// Tokens answered with 401 on data endpoints.
    pub rejected_tokens: Vec<String>,
    pub buckets: TransactionBuckets,
    pub balances: Vec<BalanceEntry>,
    pub date_from: Mutex<Vec<Option<NaiveDate>>>,
    pub deleted: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        Self::calls(&self.new_token_calls)
            + Self::calls(&self.refresh_calls)
            + Self::calls(&self.institutions_calls)
            + Self::calls(&self.data_calls)
    }

    fn data_call(&self, token: &str) -> Result<(), BankwireError> {
        self.data_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejected_tokens.iter().any(|t| t == token) {
            return Err(BankwireError::upstream("gocardless", Some(401), "token expired"));
        }
        Ok(())
    }
}

#[async_trait]
impl GoCardLessApi for StubApi {
    async fn new_token(&self) -> Result<AccessTokenResponse, BankwireError> {
        self.new_token_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AccessTokenResponse {
            access: "access-1".into(),
            access_expires: ACCESS_EXPIRES,
            refresh: "refresh-1".into(),
            refresh_expires: REFRESH_EXPIRES,
        })
    }

    async fn refresh_token(&self, refresh: &str) -> Result<RefreshTokenResponse, BankwireError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.refresh_status {
            return Err(BankwireError::upstream("gocardless", Some(status), "refresh rejected"));
        }
        Ok(RefreshTokenResponse {
            access: format!("access-from-{refresh}"),
            access_expires: ACCESS_EXPIRES,
        })
    }

    async fn health(&self) -> Result<(), BankwireError> {
        Ok(())
    }

    async fn institutions(
        &self,
        _token: &str,
        country: Option<&str>,
    ) -> Result<Vec<Bank>, BankwireError> {
        self.institutions_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Bank {
            id: BANK_ID.into(),
            name: "Sandbox Finance".into(),
            bic: Some("SFIN0000".into()),
            countries: country.map(|c| vec![c.to_string()]).unwrap_or_default(),
            logo: Some("https://cdn.example/sandbox.png".into()),
        }])
    }

    async fn requisition(&self, token: &str, id: &str) -> Result<Requisition, BankwireError> {
        self.data_call(token)?;
        Ok(Requisition {
            id: id.into(),
            status: Some("LN".into()),
            institution_id: Some(BANK_ID.into()),
            agreement: None,
            reference: None,
            accounts: vec!["acc-1".into(), "acc-2".into()],
            link: None,
        })
    }

    async fn requisitions(&self, token: &str) -> Result<RequisitionList, BankwireError> {
        self.data_call(token)?;
        Ok(RequisitionList {
            count: Some(0),
            next: None,
            previous: None,
            results: Vec::new(),
        })
    }

    async fn delete_requisition(&self, token: &str, id: &str) -> Result<(), BankwireError> {
        self.data_call(token)?;
        self.deleted.lock().unwrap().push(id.to_string());
        Ok(())
    }

    async fn account(&self, token: &str, id: &str) -> Result<AccountMetadata, BankwireError> {
        self.data_call(token)?;
        Ok(AccountMetadata {
            id: id.into(),
            institution_id: BANK_ID.into(),
            iban: None,
            status: Some("READY".into()),
            owner_name: None,
        })
    }

    async fn account_details(&self, token: &str, id: &str) -> Result<AccountDetails, BankwireError> {
        self.data_call(token)?;
        Ok(AccountDetails {
            currency: Some("EUR".into()),
            name: Some(format!("Main {id}")),
            cash_account_type: Some("CACC".into()),
            ..AccountDetails::default()
        })
    }

    async fn balances(&self, token: &str, _id: &str) -> Result<Vec<BalanceEntry>, BankwireError> {
        self.data_call(token)?;
        Ok(self.balances.clone())
    }

    async fn transactions(
        &self,
        token: &str,
        _id: &str,
        date_from: Option<NaiveDate>,
    ) -> Result<TransactionBuckets, BankwireError> {
        self.data_call(token)?;
        self.date_from.lock().unwrap().push(date_from);
        Ok(self.buckets.clone())
    }
}

/// Cache that keeps entries forever and records every write.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<CacheKey, String>>,
    puts: Mutex<Vec<(CacheKey, String, Duration)>>,
    deletes: Mutex<Vec<CacheKey>>,
}

impl RecordingCache {
    pub fn seeded(entries: &[(CacheKey, &str)]) -> Self {
        let cache = Self::default();
        {
            let mut map = cache.entries.lock().unwrap();
            for (k, v) in entries {
                map.insert(k.clone(), (*v).to_string());
            }
        }
        cache
    }

    pub fn puts(&self) -> Vec<(CacheKey, String, Duration)> {
        self.puts.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<CacheKey> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialCache for RecordingCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, BankwireError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &CacheKey, value: String, ttl: Duration) -> Result<(), BankwireError> {
        self.puts
            .lock()
            .unwrap()
            .push((key.clone(), value.clone(), ttl));
        self.entries.lock().unwrap().insert(key.clone(), value);
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), BankwireError> {
        self.deletes.lock().unwrap().push(key.clone());
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

pub fn connector(api: &Arc<StubApi>, cache: &Arc<RecordingCache>) -> GoCardLessConnector {
    GoCardLessConnector::from_adapter(
        Arc::clone(api) as Arc<dyn GoCardLessApi>,
        Arc::clone(cache) as Arc<dyn CredentialCache>,
    )
}
