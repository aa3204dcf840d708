// ── Core error types ──
//
// User-facing errors from storefront-core. Consumers never see reqwest
// types or raw JSON parse failures directly; the `From<storefront_api::Error>`
// impl collapses transport detail into the two failure classes the
// presentation layer can act on.

use std::fmt;

use thiserror::Error;

/// The two classes of fetch failure exposed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport failure, timeout, or non-2xx response.
    Network,
    /// Response body did not match the expected catalog shape.
    Decode,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Catalog decode error: {message}")]
    Decode { message: String },
}

impl CoreError {
    /// The fetch failure class, for errors that arise from a catalog fetch.
    pub fn fetch_kind(&self) -> FetchErrorKind {
        match self {
            Self::Decode { .. } => FetchErrorKind::Decode,
            Self::Network { .. } => FetchErrorKind::Network,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<storefront_api::Error> for CoreError {
    fn from(err: storefront_api::Error) -> Self {
        match err {
            storefront_api::Error::Decode { message, body: _ } => CoreError::Decode { message },
            other => CoreError::Network {
                message: other.to_string(),
            },
        }
    }
}
