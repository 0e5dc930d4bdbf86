//! Error types for the proxyfox crate.

use thiserror::Error;

/// Error returned when fetching a proxy list fails.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The proxy source could not be reached (DNS, connect, timeout).
    #[error("failed to reach proxy source: {0}")]
    Transport(#[from] reqwest::Error),
    /// The proxy source answered with a non-success status.
    #[error("proxy source returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
    /// The response body was not the expected proxy list.
    #[error("malformed proxy list response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    /// The configured endpoint is not a valid URL.
    #[error("invalid proxy source url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A configured request header could not be encoded.
    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Error returned when a protocol name is neither `http` nor `https`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported proxy protocol: {0}")]
pub struct ParseProtocolError(pub String);
