// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gazpar Core
//!
//! Core types, models, and traits for the gazpar client crates.
//!
//! This crate provides the foundational abstractions used across the other
//! gazpar crates, including:
//!
//! - Domain models (credentials, date ranges, consumption records)
//! - Error types
//! - The provider trait implemented by portal clients
//!
//! ## Key Types
//!
//! - [`Credentials`] - Portal account credentials
//! - [`DateRange`] - Inclusive range of gas days
//! - [`ConsumptionRecord`] - One gas day of consumption, in kWh
//! - [`YearOverYear`] - Two record sets a year apart
//! - [`ConsumptionProvider`] - Trait implemented by portal clients

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{total_energy_kwh, ConsumptionRecord, Credentials, DateRange, YearOverYear};

// Re-export traits
pub use traits::ConsumptionProvider;
