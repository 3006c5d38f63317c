// In-memory Teller API used by the connector tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bankwire_core::BankwireError;
use bankwire_teller::adapter::TellerApi;
use bankwire_teller::types::{TellerAccount, TellerBalances, TellerTransaction};
use serde_json::json;

pub fn account(id: &str, kind: &str) -> TellerAccount {
    serde_json::from_value(json!({
        "id": id,
        "enrollment_id": "enr_1",
        "name": format!("My {kind}"),
        "type": kind,
        "subtype": if kind == "credit" { "credit_card" } else { "checking" },
        "currency": "usd",
        "institution": { "id": "chase", "name": "Chase" },
        "last_four": "7890",
        "status": "open"
    }))
    .unwrap()
}

pub fn transaction(id: &str, amount: &str, date: &str, status: &str) -> TellerTransaction {
    serde_json::from_value(json!({
        "id": id,
        "account_id": "acc_1",
        "amount": amount,
        "date": date,
        "description": format!("Row {id}"),
        "status": status,
        "type": "card_payment",
        "running_balance": null,
        "details": { "processing_status": "complete", "category": null, "counterparty": null }
    }))
    .unwrap()
}

#[derive(Default)]
pub struct StubApi {
    pub calls: AtomicUsize,
    pub accounts: Vec<TellerAccount>,
    pub transactions: Vec<TellerTransaction>,
    pub available: Option<&'static str>,
    pub fail_balances: bool,
    pub healthy: bool,
}

impl StubApi {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TellerApi for StubApi {
    async fn accounts(&self, _token: &str) -> Result<Vec<TellerAccount>, BankwireError> {
        self.hit();
        Ok(self.accounts.clone())
    }

    async fn account(&self, _token: &str, id: &str) -> Result<TellerAccount, BankwireError> {
        self.hit();
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| BankwireError::upstream("teller", Some(404), "account not found"))
    }

    async fn balances(&self, _token: &str, id: &str) -> Result<TellerBalances, BankwireError> {
        self.hit();
        if self.fail_balances {
            return Err(BankwireError::upstream("teller", Some(502), "bank unavailable"));
        }
        Ok(serde_json::from_value(json!({
            "account_id": id,
            "ledger": "120.00",
            "available": self.available
        }))
        .unwrap())
    }

    async fn transactions(
        &self,
        _token: &str,
        _id: &str,
    ) -> Result<Vec<TellerTransaction>, BankwireError> {
        self.hit();
        Ok(self.transactions.clone())
    }

    async fn health(&self) -> Result<(), BankwireError> {
        if self.healthy {
            Ok(())
        } else {
            Err(BankwireError::transient("teller", None, "connection refused"))
        }
    }
}
