//! Freshness-aware cache controller for forecast datasets.
//!
//! `DatasetCache` decides on startup whether to restore from
//! persistent storage or refetch from the backend, tracks readiness
//! through a pending-load counter, and exposes the normalized record
//! series through its accessors.

pub mod error;
pub mod manager;

pub use error::CacheError;
pub use manager::{CacheState, DatasetCache, Snapshot};
