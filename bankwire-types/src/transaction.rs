use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Booked by the bank.
    Posted,
    /// Authorized but not yet booked.
    Pending,
}

/// How money moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionMethod {
    /// Bill or loan payment.
    Payment,
    /// Card purchase.
    CardPurchase,
    /// Cash withdrawal at an ATM.
    CardAtm,
    /// Transfer between accounts.
    Transfer,
    /// ACH / direct debit.
    Ach,
    /// Interest posted by the bank.
    Interest,
    /// Deposit.
    Deposit,
    /// Wire transfer.
    Wire,
    /// Bank fee or charge.
    Fee,
    /// Anything the provider does not classify.
    #[default]
    Other,
}

/// Canonical transaction.
///
/// Sign convention: negative amounts are outflows, positive amounts inflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signed amount.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Booking (or value) date.
    pub date: NaiveDate,
    /// Stable dedup key derived from the provider transaction id.
    pub internal_id: String,
    /// Posted or pending.
    pub status: TransactionStatus,
    /// Running balance after the transaction, when reported.
    pub balance: Option<Decimal>,
    /// Coarse category, when one can be derived.
    pub category: Option<String>,
    /// Payment method.
    pub method: TransactionMethod,
    /// Counterparty or short description.
    pub name: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Exchange rate applied when the original amount was in another currency.
    pub currency_rate: Option<Decimal>,
    /// Original currency when `currency_rate` is set.
    pub currency_source: Option<String>,
}

impl Transaction {
    /// Returns true for money leaving the account.
    #[must_use]
    pub fn is_outflow(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }
}
