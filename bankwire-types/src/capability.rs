use core::fmt;
use serde::{Deserialize, Serialize};

/// Operation labels used in errors and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Linked accounts for a consent grant.
    Accounts,
    /// Transactions of one account.
    Transactions,
    /// Current balance of one account.
    Balance,
    /// Upstream availability probe.
    HealthCheck,
    /// Revoking a consent grant.
    DeleteAccount,
    /// Institution directory.
    Institutions,
    /// Link / consent construction.
    Link,
}

impl Capability {
    /// Stable string label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Transactions => "transactions",
            Self::Balance => "balance",
            Self::HealthCheck => "health-check",
            Self::DeleteAccount => "delete-account",
            Self::Institutions => "institutions",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Capability> for String {
    fn from(c: Capability) -> Self {
        c.as_str().to_string()
    }
}
