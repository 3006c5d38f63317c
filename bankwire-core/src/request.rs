use serde::{Deserialize, Serialize};

use crate::{AccountType, BankwireError, ProviderId};

/// Request for the accounts linked to a consent grant.
///
/// Each provider identifies a grant differently, so the request is tagged
/// with the provider it is meant for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum GetAccountsRequest {
    /// Accounts of a GoCardLess requisition.
    GoCardLess {
        /// Requisition id.
        id: String,
        /// ISO 3166 country code used to resolve the bank directory.
        country_code: String,
    },
    /// Accounts of a Plaid item.
    Plaid {
        /// Item access token.
        access_token: String,
        /// Institution the item belongs to.
        institution_id: String,
    },
    /// Accounts of a Teller enrollment.
    Teller {
        /// Enrollment access token.
        access_token: String,
    },
}

impl GetAccountsRequest {
    /// Accounts of a GoCardLess requisition.
    pub fn gocardless(id: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self::GoCardLess {
            id: id.into(),
            country_code: country_code.into(),
        }
    }

    /// Accounts of a Plaid item.
    pub fn plaid(access_token: impl Into<String>, institution_id: impl Into<String>) -> Self {
        Self::Plaid {
            access_token: access_token.into(),
            institution_id: institution_id.into(),
        }
    }

    /// Accounts of a Teller enrollment.
    pub fn teller(access_token: impl Into<String>) -> Self {
        Self::Teller {
            access_token: access_token.into(),
        }
    }

    /// Provider this request is addressed to.
    #[must_use]
    pub const fn provider(&self) -> ProviderId {
        match self {
            Self::GoCardLess { .. } => ProviderId::GoCardLess,
            Self::Plaid { .. } => ProviderId::Plaid,
            Self::Teller { .. } => ProviderId::Teller,
        }
    }

    /// Error for a request handed to a provider it was not built for.
    #[must_use]
    pub fn misrouted(&self, receiver: ProviderId) -> BankwireError {
        BankwireError::invalid_request(
            receiver.as_str(),
            format!("{} accounts request sent to {receiver}", self.provider()),
        )
    }
}

/// Request for the transactions of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionsRequest {
    /// Account to fetch.
    pub account_id: String,
    /// Account classification; some providers need it to normalize signs.
    pub account_type: AccountType,
    /// Access token (Plaid, Teller).
    pub access_token: Option<String>,
    /// Only the last month instead of the full history.
    pub latest: bool,
}

impl GetTransactionsRequest {
    /// Full-history request for an account without an access token.
    pub fn new(account_id: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            account_id: account_id.into(),
            account_type,
            access_token: None,
            latest: false,
        }
    }

    /// Set the access token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Restrict to recent transactions.
    #[must_use]
    pub const fn latest(mut self, yes: bool) -> Self {
        self.latest = yes;
        self
    }
}

/// Request for the current balance of one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAccountBalanceRequest {
    /// Account to fetch.
    pub account_id: String,
    /// Access token (Plaid, Teller).
    pub access_token: Option<String>,
}

/// Request to disconnect an account.
///
/// For GoCardLess `account_id` is the requisition to delete; for Plaid the
/// item behind `access_token` is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    /// Account (or requisition) identifier.
    pub account_id: String,
    /// Access token (Plaid, Teller).
    pub access_token: Option<String>,
}

/// Return the value of a required request field, rejecting absent or blank values.
///
/// # Errors
/// Returns `BankwireError::InvalidRequest` naming the missing field.
pub fn require<'a>(
    provider: ProviderId,
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, BankwireError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BankwireError::invalid_request(
            provider.as_str(),
            format!("{field} is missing"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_rejects_blank_values() {
        let err = require(ProviderId::Teller, "accessToken", Some("  ")).unwrap_err();
        assert_eq!(
            err,
            BankwireError::invalid_request("teller", "accessToken is missing")
        );
        assert!(require(ProviderId::Teller, "accessToken", None).is_err());
        assert_eq!(
            require(ProviderId::Teller, "accessToken", Some("tok")).unwrap(),
            "tok"
        );
    }

    #[test]
    fn accounts_request_is_tagged_with_its_provider() {
        let req = GetAccountsRequest::plaid("access-sandbox", "ins_1");
        assert_eq!(req.provider(), ProviderId::Plaid);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "provider": "plaid",
                "access_token": "access-sandbox",
                "institution_id": "ins_1"
            })
        );
        let parsed: GetAccountsRequest =
            serde_json::from_str(r#"{"provider":"gocardless","id":"req-1","country_code":"SE"}"#)
                .unwrap();
        assert_eq!(parsed, GetAccountsRequest::gocardless("req-1", "SE"));
    }

    #[test]
    fn misrouted_request_names_both_providers() {
        let err = GetAccountsRequest::teller("tok").misrouted(ProviderId::Plaid);
        assert_eq!(
            err,
            BankwireError::invalid_request("plaid", "teller accounts request sent to plaid")
        );
    }

    #[test]
    fn transactions_request_builder() {
        let req = GetTransactionsRequest::new("acc_1", AccountType::Credit)
            .access_token("tok")
            .latest(true);
        assert_eq!(req.access_token.as_deref(), Some("tok"));
        assert!(req.latest);
    }
}
