//! Core error types for the gazpar crates.

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for model-level operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A date range whose start lies after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Requested start of the range.
        start: NaiveDate,
        /// Requested end of the range.
        end: NaiveDate,
    },

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
