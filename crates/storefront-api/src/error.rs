use thiserror::Error;

/// Top-level error type for the `storefront-api` crate.
///
/// The catalog endpoint has exactly two failure classes: the request never
/// produced a usable response (network), or the response body did not match
/// the expected array-of-records shape (decode). `storefront-core` maps
/// these into its own taxonomy; nothing above this crate sees reqwest types.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint answered with a non-success status.
    #[error("Catalog endpoint returned HTTP {status}")]
    Status { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// Returns `true` for transport-level failures (anything that is not a
    /// body-shape problem).
    pub fn is_network(&self) -> bool {
        !self.is_decode()
    }

    /// Returns `true` if the response body failed to parse.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` if this is a transient error worth retrying manually.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status } => *status >= 500,
            _ => false,
        }
    }
}
