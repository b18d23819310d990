// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Gazpar Fetch
//!
//! HTTP transport for the gazpar client crates.
//!
//! This crate provides the infrastructure a portal client builds on:
//!
//! - [`HttpClient`] - A cookie-jar-owning HTTP client that presents itself
//!   as a browser
//! - [`RetryPolicy`] - Linear backoff schedule for rate-limited requests
//! - [`FetchError`] - Transport-level errors
//!
//! Status-code classification (session expiry, rate limiting, data
//! parsing) belongs to the provider crate; this layer only moves bytes and
//! cookies.

pub mod client;
pub mod error;
pub mod retry;

pub use client::HttpClient;
pub use error::FetchError;
pub use retry::RetryPolicy;
