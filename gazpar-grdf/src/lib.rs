// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gazpar GrDF
//!
//! Client for the GrDF customer portal, which exposes no public API.
//!
//! The portal hands out consumption data only to a browser-shaped,
//! cookie-authenticated session. This crate reproduces that session:
//!
//! - [`okta`] scrapes the Okta state token out of the entry page
//! - the identity handshake walks the identify/challenge/redirect steps
//!   and resolves the account's delivery point (PCE)
//! - [`GrdfClient`] owns the session, re-authenticates transparently when
//!   the portal expires it, backs off on rate limits, and shapes the
//!   response into [`ConsumptionRecord`](gazpar_core::ConsumptionRecord)s
//!
//! ## Usage
//!
//! ```ignore
//! use gazpar_core::{Credentials, DateRange};
//! use gazpar_grdf::GrdfClient;
//!
//! let mut client = GrdfClient::new(Credentials::new(email, password))?;
//! let records = client.fetch_consumption(DateRange::last_days(8)).await?;
//! let comparison = client.fetch_year_over_year(8).await?;
//! ```
//!
//! The library performs no logging setup and persists nothing; install a
//! `tracing` subscriber in the host application to see diagnostics.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod okta;

mod handshake;
mod legacy;
mod session;

// Re-export key types at crate root
pub use client::{GrdfClient, LoginFlow};
pub use endpoints::Endpoints;
pub use error::{ExtractionError, GrdfError, HandshakeError};
pub use okta::extract_state_token;

// Re-exports for configuring a client without naming the lower crates
pub use gazpar_core::{ConsumptionProvider, ConsumptionRecord, Credentials, DateRange, YearOverYear};
pub use gazpar_fetch::RetryPolicy;
