use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BankwireError;

/// Identifier of an upstream bank-connectivity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// European open-banking aggregator (GoCardless Bank Account Data).
    GoCardLess,
    /// North-American aggregator (Plaid).
    Plaid,
    /// Direct-bank aggregator (Teller).
    Teller,
}

impl ProviderId {
    /// All known providers in a stable order.
    pub const ALL: [Self; 3] = [Self::GoCardLess, Self::Plaid, Self::Teller];

    /// Wire name used in requests, cache keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GoCardLess => "gocardless",
            Self::Plaid => "plaid",
            Self::Teller => "teller",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = BankwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BankwireError::invalid_request(s, "unknown provider"))
    }
}
