//! Error types shared by the analyzer, the scorer and the fetch layer

use thiserror::Error;

/// Failure of a single attempt to obtain page HTML.
///
/// Every variant is distinguishable so the caller can decide whether to
/// fall back to the next source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("website returned status {status}")]
    HttpStatus { status: u16 },

    #[error("unable to fetch valid HTML content ({length} characters)")]
    EmptyBody { length: usize },

    #[error("transport error: {0}")]
    Transport(String),

    #[error(
        "unable to fetch website content ({reason}). The relay server may not be running, start it with `seokit-relay`"
    )]
    AllProxiesFailed { reason: String },
}

impl FetchError {
    /// Whether trying another source could succeed where this one failed.
    ///
    /// A malformed URL fails identically everywhere; everything else is
    /// specific to the source that produced it.
    pub fn is_fallback_candidate(&self) -> bool {
        !matches!(self, Self::InvalidUrl(_) | Self::AllProxiesFailed { .. })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("keyword is empty")]
    EmptyKeyword,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
