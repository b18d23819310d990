//! GrDF-specific error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while scraping the state token out of the entry page.
///
/// Each case is distinguishable for diagnostics; all of them are fatal to
/// the handshake attempt that triggered the extraction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// No script block on the page carries the Okta bootstrap data.
    #[error("no script block containing oktaData found in entry page")]
    ScriptBlockNotFound,

    /// A script block mentions the variable but the assignment could not
    /// be located.
    #[error("oktaData assignment not found in script block")]
    OktaDataNotFound,

    /// The decoded object literal carries no usable state token.
    #[error("stateToken field missing from oktaData")]
    StateTokenMissing,
}

/// Stage-tagged authentication failures.
///
/// The handshake is strictly ordered and non-retryable; whichever stage
/// fails first is the one reported. Retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// The portal entry page answered with a non-success status.
    #[error("entry page returned status {status}")]
    EntryPage {
        /// Status returned by the portal.
        status: StatusCode,
    },

    /// The identify step answered with a non-success status.
    #[error("identify step returned status {status}")]
    Identify {
        /// Status returned by the identity provider.
        status: StatusCode,
    },

    /// The identify response carried no state handle.
    #[error("identify response carried no state handle")]
    MissingStateHandle,

    /// The challenge step answered with a non-success status.
    #[error("challenge step returned status {status}")]
    Challenge {
        /// Status returned by the identity provider.
        status: StatusCode,
    },

    /// The challenge response carried no success redirect.
    #[error("challenge response carried no success redirect")]
    MissingRedirect,

    /// The account listing answered with a non-success status.
    #[error("account lookup returned status {status}")]
    AccountLookup {
        /// Status returned by the portal API.
        status: StatusCode,
    },

    /// The account listing was empty.
    #[error("account lookup returned no delivery points")]
    NoAccounts,

    /// The legacy auth endpoint answered with a non-success status.
    #[error("legacy auth returned status {status}")]
    LegacyAuth {
        /// Status returned by the login host.
        status: StatusCode,
    },

    /// The legacy auth endpoint rejected the login.
    #[error("legacy auth rejected login with state {state:?}")]
    LegacyRejected {
        /// The `state` field of the auth response.
        state: String,
    },
}

/// Error type for GrDF client operations.
#[derive(Debug, Error)]
pub enum GrdfError {
    /// Entry-page scraping failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// An authentication stage failed.
    #[error(transparent)]
    Handshake(#[from] HandshakeError),

    /// The consumption query kept answering 429 until the retry budget
    /// ran out.
    #[error("rate limited: {attempts} consecutive 429 responses")]
    RateLimitExceeded {
        /// Number of attempts made.
        attempts: u32,
    },

    /// The portal kept rejecting the session right after successful
    /// re-authentication.
    #[error("session rejected {refreshes} times in a row after re-authentication")]
    SessionRefreshLoop {
        /// Number of re-authentications performed within one query.
        refreshes: u32,
    },

    /// The consumption query answered with an unclassified status.
    #[error("consumption query returned status {0}")]
    UnexpectedStatus(StatusCode),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(#[from] gazpar_fetch::FetchError),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core model error.
    #[error(transparent)]
    Core(#[from] gazpar_core::CoreError),
}
