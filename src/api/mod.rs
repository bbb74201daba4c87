//! Client module for the forecast data endpoint.
//!
//! Provides the `ApiClient` for fetching per-component forecast series
//! and the `ForecastBackend` trait the cache controller is generic
//! over.

pub mod client;
pub mod error;

pub use client::{ApiClient, ForecastBackend};
pub use error::ApiError;
