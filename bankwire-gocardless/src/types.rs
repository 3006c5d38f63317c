//! Wire types of the GoCardless Bank Account Data API (v2).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response of `POST /api/v2/token/new/`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    /// Bearer access token.
    pub access: String,
    /// Access token lifetime in seconds.
    pub access_expires: i64,
    /// Refresh token.
    pub refresh: String,
    /// Refresh token lifetime in seconds.
    pub refresh_expires: i64,
}

/// Response of `POST /api/v2/token/refresh/`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenResponse {
    /// New bearer access token.
    pub access: String,
    /// Access token lifetime in seconds.
    pub access_expires: i64,
}

/// Entry of the institution directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Institution id, e.g. `SANDBOXFINANCE_SFIN0000`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// BIC, when published.
    #[serde(default)]
    pub bic: Option<String>,
    /// Countries served.
    #[serde(default)]
    pub countries: Vec<String>,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
}

/// A consent grant linking an end user's bank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Requisition {
    /// Requisition id.
    pub id: String,
    /// Status code such as `LN` (linked) or `EX` (expired).
    #[serde(default)]
    pub status: Option<String>,
    /// Institution the requisition was created for.
    #[serde(default)]
    pub institution_id: Option<String>,
    /// End-user agreement id.
    #[serde(default)]
    pub agreement: Option<String>,
    /// Caller reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Linked account ids.
    #[serde(default)]
    pub accounts: Vec<String>,
    /// Consent link for the end user.
    #[serde(default)]
    pub link: Option<String>,
}

/// Page of `GET /api/v2/requisitions/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequisitionList {
    /// Total number of requisitions.
    #[serde(default)]
    pub count: Option<u64>,
    /// Next page URL.
    #[serde(default)]
    pub next: Option<String>,
    /// Previous page URL.
    #[serde(default)]
    pub previous: Option<String>,
    /// Requisitions on this page.
    #[serde(default)]
    pub results: Vec<Requisition>,
}

/// Response of `GET /api/v2/accounts/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountMetadata {
    /// Account id.
    pub id: String,
    /// Institution holding the account.
    pub institution_id: String,
    /// IBAN.
    #[serde(default)]
    pub iban: Option<String>,
    /// Processing status.
    #[serde(default)]
    pub status: Option<String>,
    /// Owner name.
    #[serde(default)]
    pub owner_name: Option<String>,
}

/// Response of `GET /api/v2/accounts/{id}/details/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountDetailsResponse {
    /// Account details.
    pub account: AccountDetails,
}

/// Account details in Berlin Group field naming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    /// Bank-side resource id.
    #[serde(default)]
    pub resource_id: Option<String>,
    /// IBAN.
    #[serde(default)]
    pub iban: Option<String>,
    /// ISO 4217 currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Owner name.
    #[serde(default)]
    pub owner_name: Option<String>,
    /// Account name given by the bank or user.
    #[serde(default)]
    pub name: Option<String>,
    /// Product name.
    #[serde(default)]
    pub product: Option<String>,
    /// ISO 20022 cash account type (`CACC`, `SVGS`, `CARD`, `LOAN`, ...).
    #[serde(default)]
    pub cash_account_type: Option<String>,
}

/// Metadata and details of one account fetched together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// `GET /accounts/{id}/` payload.
    pub metadata: AccountMetadata,
    /// `GET /accounts/{id}/details/` payload.
    pub details: AccountDetails,
}

/// Monetary amount with a string-encoded decimal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Amount {
    /// Signed decimal amount.
    pub amount: Decimal,
    /// ISO 4217 currency.
    pub currency: String,
}

/// Response of `GET /api/v2/accounts/{id}/balances/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalancesResponse {
    /// Balances by type.
    #[serde(default)]
    pub balances: Vec<BalanceEntry>,
}

/// One balance of an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    /// Amount and currency.
    pub balance_amount: Amount,
    /// Balance type, e.g. `interimAvailable`, `closingBooked`.
    pub balance_type: String,
    /// Reference date.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Response of `GET /api/v2/accounts/{id}/transactions/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionsResponse {
    /// Booked and pending buckets.
    pub transactions: TransactionBuckets,
}

/// Transactions split by booking state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionBuckets {
    /// Booked transactions.
    #[serde(default)]
    pub booked: Vec<GcTransaction>,
    /// Pending transactions.
    #[serde(default)]
    pub pending: Vec<GcTransaction>,
}

/// Currency exchange information; banks send either one object or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CurrencyExchangeField {
    /// Single exchange record.
    One(CurrencyExchange),
    /// List of exchange records.
    Many(Vec<CurrencyExchange>),
}

impl CurrencyExchangeField {
    /// First exchange record, if any.
    #[must_use]
    pub fn first(&self) -> Option<&CurrencyExchange> {
        match self {
            Self::One(x) => Some(x),
            Self::Many(list) => list.first(),
        }
    }
}

/// Exchange record of a foreign-currency transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyExchange {
    /// Original currency.
    #[serde(default)]
    pub source_currency: Option<String>,
    /// Applied rate.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Account currency.
    #[serde(default)]
    pub target_currency: Option<String>,
}

/// Running balance attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAfterTransaction {
    /// Balance amount.
    pub balance_amount: Amount,
}

/// Transaction as reported by GoCardless.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcTransaction {
    /// Bank transaction id.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// GoCardless internal id.
    #[serde(default)]
    pub internal_transaction_id: Option<String>,
    /// Booking date.
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
    /// Value date.
    #[serde(default)]
    pub value_date: Option<NaiveDate>,
    /// Signed amount.
    pub transaction_amount: Amount,
    /// Foreign exchange details.
    #[serde(default)]
    pub currency_exchange: Option<CurrencyExchangeField>,
    /// Payee of an outgoing payment.
    #[serde(default)]
    pub creditor_name: Option<String>,
    /// Payer of an incoming payment.
    #[serde(default)]
    pub debtor_name: Option<String>,
    /// Free-text remittance information.
    #[serde(default)]
    pub remittance_information_unstructured: Option<String>,
    /// Free-text remittance information split in lines.
    #[serde(default)]
    pub remittance_information_unstructured_array: Option<Vec<String>>,
    /// Structured remittance reference.
    #[serde(default)]
    pub remittance_information_structured: Option<String>,
    /// Extra bank text.
    #[serde(default)]
    pub additional_information: Option<String>,
    /// Bank-specific transaction code.
    #[serde(default)]
    pub proprietary_bank_transaction_code: Option<String>,
    /// Running balance.
    #[serde(default)]
    pub balance_after_transaction: Option<BalanceAfterTransaction>,
}

/// Body of `POST /api/v2/agreements/enduser/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgreementRequest {
    /// Institution to request access from.
    pub institution_id: String,
    /// Requested scopes.
    pub access_scope: Vec<String>,
    /// Consent validity in days.
    pub access_valid_for_days: u32,
    /// How far back transactions may be read.
    pub max_historical_days: u32,
}

/// End-user agreement created for a requisition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndUserAgreement {
    /// Agreement id.
    pub id: String,
    /// Institution id.
    pub institution_id: String,
    /// History window in days.
    #[serde(default)]
    pub max_historical_days: Option<u32>,
    /// Consent validity in days.
    #[serde(default)]
    pub access_valid_for_days: Option<u32>,
    /// Granted scopes.
    #[serde(default)]
    pub access_scope: Vec<String>,
    /// Acceptance timestamp.
    #[serde(default)]
    pub accepted: Option<String>,
}

/// Body of `POST /api/v2/requisitions/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequisitionRequest {
    /// Where the end user is sent after consenting.
    pub redirect: String,
    /// Institution to link.
    pub institution_id: String,
    /// Agreement id; the bank default applies when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<String>,
}
