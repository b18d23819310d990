//! Trait definitions for the gazpar crates.
//!
//! This module defines the seam between consumption-data providers and the
//! applications that consume them.

use crate::models::{ConsumptionRecord, DateRange, YearOverYear};

/// Trait for providers that can fetch gas-consumption time series.
///
/// Implementors of this trait are responsible for:
/// - Authenticating with the provider's portal
/// - Fetching consumption data for a date range
/// - Parsing and normalizing the response into [`ConsumptionRecord`]s
///
/// Methods take `&mut self`: a provider owns its session state and issues
/// strictly sequential requests. Callers wanting parallelism run separate
/// provider instances.
pub trait ConsumptionProvider {
    /// Provider-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches consumption records for the given date range.
    ///
    /// This is an async operation involving network requests; the session
    /// is established lazily on first use.
    fn fetch_consumption(
        &mut self,
        range: DateRange,
    ) -> impl std::future::Future<Output = Result<Vec<ConsumptionRecord>, Self::Error>> + Send;

    /// Fetches the last `window_days` days alongside the same window one
    /// year earlier.
    fn fetch_year_over_year(
        &mut self,
        window_days: u64,
    ) -> impl std::future::Future<Output = Result<YearOverYear, Self::Error>> + Send;
}
