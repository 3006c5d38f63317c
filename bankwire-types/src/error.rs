use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the bankwire workspace.
///
/// Variants separate caller mistakes (`InvalidRequest`), upstream outages
/// (`Upstream`, `TransientNetwork`) and schema drift (`Transform`) so that a
/// credential problem can be told apart from an outage.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankwireError {
    /// A required identifier or token is missing for the selected provider.
    ///
    /// Always raised before any network call.
    #[error("invalid request for {provider}: {msg}")]
    InvalidRequest {
        /// Provider the request was addressed to.
        provider: String,
        /// Human-readable description of what is missing.
        msg: String,
    },

    /// A provider answered with a non-2xx status after retries were exhausted.
    #[error("{provider} upstream error (status {status:?}): {msg}")]
    Upstream {
        /// Provider that failed.
        provider: String,
        /// HTTP status when one was received.
        status: Option<u16>,
        /// Operation label (e.g. "transactions") when known.
        capability: Option<String>,
        /// Upstream message or body excerpt.
        msg: String,
    },

    /// Retryable failure: connection error, timeout, 5xx or 429.
    #[error("{provider} transient failure (status {status:?}): {msg}")]
    TransientNetwork {
        /// Provider that failed.
        provider: String,
        /// HTTP status when one was received.
        status: Option<u16>,
        /// Transport or upstream message.
        msg: String,
    },

    /// The upstream payload did not have the expected shape.
    #[error("{provider} returned an unexpected payload: {msg}")]
    Transform {
        /// Provider whose payload failed to map.
        provider: String,
        /// Operation label when known.
        capability: Option<String>,
        /// Decoder or mapping message.
        msg: String,
    },

    /// The requested capability is not offered by the target provider.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label, e.g. "institutions".
        capability: String,
    },

    /// The facade has no adapter registered for the provider.
    #[error("provider not registered: {provider}")]
    NotRegistered {
        /// Provider identifier that was requested.
        provider: String,
    },

    /// The credential cache collaborator failed.
    #[error("credential cache error: {0}")]
    Cache(String),
}

impl BankwireError {
    /// Helper: build an `InvalidRequest` error.
    pub fn invalid_request(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `Upstream` error without an operation label.
    pub fn upstream(provider: impl Into<String>, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status,
            capability: None,
            msg: msg.into(),
        }
    }

    /// Helper: build a `TransientNetwork` error.
    pub fn transient(provider: impl Into<String>, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::TransientNetwork {
            provider: provider.into(),
            status,
            msg: msg.into(),
        }
    }

    /// Helper: build a `Transform` error without an operation label.
    pub fn transform(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transform {
            provider: provider.into(),
            capability: None,
            msg: msg.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `NotRegistered` error.
    pub fn not_registered(provider: impl Into<String>) -> Self {
        Self::NotRegistered {
            provider: provider.into(),
        }
    }

    /// Returns true if the failure may succeed when attempted again.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::TransientNetwork { .. })
    }

    /// HTTP status attached to the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } | Self::TransientNetwork { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns true for upstream 401 responses (expired or revoked credentials).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Convert a retry-exhausted transient failure into its terminal form.
    #[must_use]
    pub fn into_terminal(self) -> Self {
        match self {
            Self::TransientNetwork {
                provider,
                status,
                msg,
            } => Self::Upstream {
                provider,
                status,
                capability: None,
                msg,
            },
            other => other,
        }
    }

    /// Attach an operation label to upstream and transform errors.
    ///
    /// Labels already present are kept.
    #[must_use]
    pub fn with_capability(self, cap: impl Into<String>) -> Self {
        match self {
            Self::Upstream {
                provider,
                status,
                capability,
                msg,
            } => Self::Upstream {
                provider,
                status,
                capability: capability.or_else(|| Some(cap.into())),
                msg,
            },
            Self::Transform {
                provider,
                capability,
                msg,
            } => Self::Transform {
                provider,
                capability: capability.or_else(|| Some(cap.into())),
                msg,
            },
            other => other,
        }
    }
}
