//! Request and response bodies of the Plaid API used by the connector.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Options of `accounts/get`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountsGetOptions {
    /// Restrict the response to these accounts.
    pub account_ids: Vec<String>,
}

/// Body of `accounts/get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountsGetRequest<'a> {
    /// Item access token.
    pub access_token: &'a str,
    /// Optional account filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<AccountsGetOptions>,
}

/// Response of `accounts/get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountsGetResponse {
    /// Accounts of the item.
    pub accounts: Vec<PlaidAccount>,
}

/// Account as reported by Plaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaidAccount {
    /// Account id, stable for the item.
    pub account_id: String,
    /// Name given by the user or the institution.
    pub name: String,
    /// Official product name.
    #[serde(default)]
    pub official_name: Option<String>,
    /// Last digits of the account number.
    #[serde(default)]
    pub mask: Option<String>,
    /// `depository`, `credit`, `loan`, `investment` or `other`.
    #[serde(rename = "type")]
    pub account_type: String,
    /// Finer classification, e.g. `checking`.
    #[serde(default)]
    pub subtype: Option<String>,
    /// Balances.
    pub balances: PlaidBalances,
}

/// Balances block of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaidBalances {
    /// Funds available to spend.
    #[serde(default)]
    pub available: Option<Decimal>,
    /// Ledger balance.
    #[serde(default)]
    pub current: Option<Decimal>,
    /// ISO 4217 currency.
    #[serde(default)]
    pub iso_currency_code: Option<String>,
    /// Non-ISO currency (crypto and the like).
    #[serde(default)]
    pub unofficial_currency_code: Option<String>,
}

/// Options of the institution endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstitutionOptions {
    /// Ask for logo, colour and URL.
    pub include_optional_metadata: bool,
}

/// Body of `institutions/get_by_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionByIdRequest<'a> {
    /// Institution id.
    pub institution_id: &'a str,
    /// Countries the integration is enabled for.
    pub country_codes: &'a [String],
    /// Metadata options.
    pub options: InstitutionOptions,
}

/// Response of `institutions/get_by_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstitutionByIdResponse {
    /// The institution.
    pub institution: PlaidInstitution,
}

/// Body of `institutions/get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionsGetRequest<'a> {
    /// Countries to list.
    pub country_codes: &'a [String],
    /// Page size, at most 500.
    pub count: usize,
    /// Number of entries to skip.
    pub offset: usize,
    /// Metadata options.
    pub options: InstitutionOptions,
}

/// Response of `institutions/get`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstitutionsGetResponse {
    /// Institutions of this page.
    pub institutions: Vec<PlaidInstitution>,
    /// Total number of institutions.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Institution as reported by Plaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaidInstitution {
    /// Institution id, e.g. `ins_109508`.
    pub institution_id: String,
    /// Display name.
    pub name: String,
    /// Base64-encoded PNG logo, rarely present.
    #[serde(default)]
    pub logo: Option<String>,
    /// Home page.
    #[serde(default)]
    pub url: Option<String>,
    /// Countries served.
    #[serde(default)]
    pub country_codes: Vec<String>,
}

/// Body of `transactions/sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionsSyncRequest<'a> {
    /// Item access token.
    pub access_token: &'a str,
    /// Cursor returned by the previous page; absent for the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
    /// Page size, at most 500.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Response of `transactions/sync`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionsSyncResponse {
    /// Transactions added since the cursor.
    #[serde(default)]
    pub added: Vec<PlaidTransaction>,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_cursor: String,
    /// Whether more pages are waiting.
    #[serde(default)]
    pub has_more: bool,
}

/// Personal finance category attached by Plaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalFinanceCategory {
    /// Primary category, e.g. `FOOD_AND_DRINK`.
    pub primary: String,
    /// Detailed category.
    #[serde(default)]
    pub detailed: Option<String>,
}

/// Transaction as reported by Plaid.
///
/// Plaid reports money leaving the account as a positive amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaidTransaction {
    /// Transaction id, stable across syncs.
    pub transaction_id: String,
    /// Account the transaction belongs to.
    pub account_id: String,
    /// Amount, positive for outflows.
    pub amount: Decimal,
    /// ISO 4217 currency.
    #[serde(default)]
    pub iso_currency_code: Option<String>,
    /// Non-ISO currency.
    #[serde(default)]
    pub unofficial_currency_code: Option<String>,
    /// Posting date, or transaction date while pending.
    pub date: NaiveDate,
    /// Authorization date.
    #[serde(default)]
    pub authorized_date: Option<NaiveDate>,
    /// Cleaned-up description.
    pub name: String,
    /// Merchant name, when recognised.
    #[serde(default)]
    pub merchant_name: Option<String>,
    /// Raw bank description.
    #[serde(default)]
    pub original_description: Option<String>,
    /// Whether the transaction is still pending.
    #[serde(default)]
    pub pending: bool,
    /// `online`, `in store` or `other`.
    #[serde(default)]
    pub payment_channel: Option<String>,
    /// Bank transaction code (`atm`, `purchase`, `transfer`, ...).
    #[serde(default)]
    pub transaction_code: Option<String>,
    /// Category assigned by Plaid.
    #[serde(default)]
    pub personal_finance_category: Option<PersonalFinanceCategory>,
}

/// Transactions product settings of a link token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTransactions {
    /// History requested at link time.
    pub days_requested: u32,
}

/// End user of a link token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkUser {
    /// Caller-side user id.
    pub client_user_id: String,
}

/// Body of `link/token/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTokenCreateRequest {
    /// Name shown in Link.
    pub client_name: String,
    /// Products to initialise.
    pub products: Vec<String>,
    /// Link UI language.
    pub language: String,
    /// Countries offered in Link.
    pub country_codes: Vec<String>,
    /// Transactions product settings.
    pub transactions: LinkTransactions,
    /// End user.
    pub user: LinkUser,
}

/// Response of `link/token/create`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkTokenCreateResponse {
    /// Token to open Link with.
    pub link_token: String,
    /// Expiry timestamp.
    #[serde(default)]
    pub expiration: Option<String>,
    /// Plaid request id.
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Response of `item/public_token/exchange`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicTokenExchangeResponse {
    /// Long-lived item access token.
    pub access_token: String,
    /// Item id.
    pub item_id: String,
    /// Plaid request id.
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Plaid status page document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    /// Overall status.
    pub status: StatusIndicator,
}

/// Overall status of the Plaid platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusIndicator {
    /// `none`, `minor`, `major`, `critical` or `maintenance`.
    pub indicator: String,
    /// Human-readable summary.
    #[serde(default)]
    pub description: Option<String>,
}

impl StatusResponse {
    /// Healthy while nothing is reported or only maintenance is scheduled.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(self.status.indicator.as_str(), "none" | "maintenance")
    }
}
