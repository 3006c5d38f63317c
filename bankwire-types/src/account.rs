use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ProviderId;

/// Broad account classification shared by all providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking, savings and other cash accounts.
    #[default]
    Depository,
    /// Credit cards and lines of credit.
    Credit,
    /// Mortgages, student and consumer loans.
    Loan,
    /// Anything else (investment, brokerage, ...).
    Other,
}

/// Bank or financial institution an account belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// Provider-scoped institution identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Logo URL or data URI; `None` when the provider has none.
    pub logo: Option<String>,
}

/// Canonical account.
///
/// `id` is unique within a (provider, access token) scope, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Provider-scoped account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Provider that reported the account.
    pub provider: ProviderId,
    /// Account classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Institution, when the provider reports one.
    pub institution: Option<Institution>,
    /// Teller enrollment used to reconnect the account.
    pub enrollment_id: Option<String>,
}

/// Current balance snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Signed amount.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}
