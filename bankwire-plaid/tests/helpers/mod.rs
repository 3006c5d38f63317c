// In-memory Plaid API used by the connector tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bankwire_core::BankwireError;
use bankwire_plaid::adapter::PlaidApi;
use bankwire_plaid::types::{
    PlaidAccount, PlaidBalances, PlaidInstitution, PlaidTransaction, PublicTokenExchangeResponse,
    StatusIndicator, StatusResponse, TransactionsSyncResponse,
};
use serde_json::json;

pub fn transaction(id: &str, account_id: &str, amount: f64, pending: bool) -> PlaidTransaction {
    serde_json::from_value(json!({
        "transaction_id": id,
        "account_id": account_id,
        "amount": amount,
        "iso_currency_code": "USD",
        "date": "2024-04-10",
        "name": format!("Purchase {id}"),
        "pending": pending,
        "payment_channel": "in store"
    }))
    .unwrap()
}

pub fn institution(n: usize) -> PlaidInstitution {
    PlaidInstitution {
        institution_id: format!("ins_{n}"),
        name: format!("Bank {n}"),
        logo: None,
        url: None,
        country_codes: vec!["US".into()],
    }
}

#[derive(Default)]
pub struct StubApi {
    pub calls: AtomicUsize,
    /// Pages served by `transactions/sync`, keyed by the cursor they answer.
    pub sync_pages: Vec<(Option<String>, TransactionsSyncResponse)>,
    pub sync_requests: Mutex<Vec<(Option<String>, Option<u32>)>>,
    pub institutions_total: usize,
    /// Number of transient failures served before the second institutions page succeeds.
    pub flaky_page_failures: AtomicUsize,
    pub page_requests: Mutex<Vec<(usize, usize)>>,
    pub accounts: Vec<PlaidAccount>,
    pub removed: Mutex<Vec<String>>,
    pub indicator: Option<String>,
}

impl StubApi {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn account(id: &str, kind: &str, available: Option<i64>) -> PlaidAccount {
    PlaidAccount {
        account_id: id.into(),
        name: format!("Plaid {kind}"),
        official_name: None,
        mask: Some("0000".into()),
        account_type: kind.into(),
        subtype: None,
        balances: PlaidBalances {
            available: available.map(rust_decimal::Decimal::from),
            current: Some(rust_decimal::Decimal::from(100)),
            iso_currency_code: Some("USD".into()),
            unofficial_currency_code: None,
        },
    }
}

#[async_trait]
impl PlaidApi for StubApi {
    async fn accounts(
        &self,
        _access_token: &str,
        account_ids: Option<&[String]>,
    ) -> Result<Vec<PlaidAccount>, BankwireError> {
        self.hit();
        Ok(self
            .accounts
            .iter()
            .filter(|a| account_ids.is_none_or(|ids| ids.contains(&a.account_id)))
            .cloned()
            .collect())
    }

    async fn institution_by_id(
        &self,
        institution_id: &str,
        _country_codes: &[String],
    ) -> Result<PlaidInstitution, BankwireError> {
        self.hit();
        Ok(PlaidInstitution {
            institution_id: institution_id.into(),
            name: "First Platypus Bank".into(),
            logo: None,
            url: None,
            country_codes: vec!["US".into()],
        })
    }

    async fn institutions_page(
        &self,
        _country_codes: &[String],
        offset: usize,
        count: usize,
    ) -> Result<Vec<PlaidInstitution>, BankwireError> {
        self.hit();
        self.page_requests.lock().unwrap().push((offset, count));
        if offset > 0
            && self
                .flaky_page_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        {
            return Err(BankwireError::transient("plaid", Some(503), "busy"));
        }
        let end = (offset + count).min(self.institutions_total);
        Ok((offset..end).map(institution).collect())
    }

    async fn transactions_sync(
        &self,
        _access_token: &str,
        cursor: Option<&str>,
        count: Option<u32>,
    ) -> Result<TransactionsSyncResponse, BankwireError> {
        self.hit();
        self.sync_requests
            .lock()
            .unwrap()
            .push((cursor.map(str::to_string), count));
        self.sync_pages
            .iter()
            .find(|(c, _)| c.as_deref() == cursor)
            .map(|(_, page)| page.clone())
            .ok_or_else(|| BankwireError::upstream("plaid", Some(400), "INVALID_CURSOR"))
    }

    async fn exchange_public_token(
        &self,
        public_token: &str,
    ) -> Result<PublicTokenExchangeResponse, BankwireError> {
        self.hit();
        Ok(PublicTokenExchangeResponse {
            access_token: format!("access-for-{public_token}"),
            item_id: "item_1".into(),
            request_id: None,
        })
    }

    async fn item_remove(&self, access_token: &str) -> Result<(), BankwireError> {
        self.hit();
        self.removed.lock().unwrap().push(access_token.to_string());
        Ok(())
    }

    async fn status(&self) -> Result<StatusResponse, BankwireError> {
        match &self.indicator {
            Some(indicator) => Ok(StatusResponse {
                status: StatusIndicator {
                    indicator: indicator.clone(),
                    description: None,
                },
            }),
            None => Err(BankwireError::transient("plaid", None, "connection refused")),
        }
    }
}
