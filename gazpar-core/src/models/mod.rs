//! Domain models for the gazpar client.
//!
//! ## Submodules
//!
//! - [`credentials`] - Portal login credentials
//! - [`date_range`] - Gas-day date ranges
//! - [`consumption`] - Consumption records and comparisons

mod consumption;
mod credentials;
mod date_range;

// Re-export everything at the models level
pub use consumption::{total_energy_kwh, ConsumptionRecord, YearOverYear};
pub use credentials::Credentials;
pub use date_range::DateRange;
