//! Wire types of the Teller API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Institution block embedded in an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerInstitution {
    /// Institution id, e.g. `chase`.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Account as reported by Teller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerAccount {
    /// Account id.
    pub id: String,
    /// Enrollment the account belongs to; needed to reconnect.
    pub enrollment_id: String,
    /// Account name.
    pub name: String,
    /// `depository` or `credit`.
    #[serde(rename = "type")]
    pub account_type: String,
    /// Finer classification, e.g. `checking`, `credit_card`.
    #[serde(default)]
    pub subtype: Option<String>,
    /// ISO 4217 currency.
    pub currency: String,
    /// Holding institution.
    pub institution: TellerInstitution,
    /// Last four digits of the account number.
    #[serde(default)]
    pub last_four: Option<String>,
    /// `open` or `closed`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Response of `GET /accounts/{id}/balances`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerBalances {
    /// Account id.
    pub account_id: String,
    /// Ledger balance.
    #[serde(default)]
    pub ledger: Option<Decimal>,
    /// Available balance.
    #[serde(default)]
    pub available: Option<Decimal>,
}

/// Counterparty of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Name, when Teller could enrich it.
    #[serde(default)]
    pub name: Option<String>,
    /// `organization` or `person`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Enrichment details of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    /// `pending` or `complete` enrichment.
    #[serde(default)]
    pub processing_status: Option<String>,
    /// Teller category, e.g. `dining`.
    #[serde(default)]
    pub category: Option<String>,
    /// Counterparty.
    #[serde(default)]
    pub counterparty: Option<Counterparty>,
}

/// Transaction as reported by Teller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TellerTransaction {
    /// Transaction id.
    pub id: String,
    /// Account id.
    pub account_id: String,
    /// Signed amount as a decimal string.
    pub amount: Decimal,
    /// Transaction date.
    pub date: NaiveDate,
    /// Bank description.
    pub description: String,
    /// `posted` or `pending`.
    pub status: String,
    /// Kind of transaction, e.g. `card_payment`, `ach`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Running balance after this transaction.
    #[serde(default)]
    pub running_balance: Option<Decimal>,
    /// Enrichment.
    #[serde(default)]
    pub details: TransactionDetails,
}
