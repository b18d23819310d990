//! Transport error types.

use thiserror::Error;

/// Error type for HTTP transport operations.
///
/// Transport errors cover connection, TLS, and request-building failures.
/// Status-code classification (session expiry, rate limiting) is the
/// caller's concern and lives with the provider client.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header value could not be constructed.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}
