use thiserror::Error;

use crate::wire::ApiError;

/// Message used when a failed response carries no usable error text.
pub const DEFAULT_ERROR_MESSAGE: &str = "failed to fetch feed data";

pub type Result<T, E = FetchError> = core::result::Result<T, E>;

/// Why a page could not be fetched.
///
/// `Display` is what ends up in the feed's `error` state, so the upstream variant renders the
/// proxy's message verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[cfg(feature = "http")]
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid feed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Builds an upstream error from a non-2xx response body.
    ///
    /// Uses the body's `error` field when present, [`DEFAULT_ERROR_MESSAGE`] otherwise.
    pub fn upstream(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiError>(body)
            .ok()
            .map(|e| e.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        Self::Upstream { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}
