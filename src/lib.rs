//! pollcache - a freshness-aware local cache for PollyVote forecast
//! datasets.
//!
//! The backend serves one JSON series per forecast component (polls,
//! markets, expert judgment, ...). `DatasetCache` fetches them all
//! concurrently on first use, persists the raw copies locally, and on
//! later startups restores from the persisted copy as long as it is
//! younger than the freshness window. Records are normalized on the
//! way into the snapshot: source-format dates become ISO dates and
//! vote shares become one-decimal strings.
//!
//! ```no_run
//! use pollcache::api::ApiClient;
//! use pollcache::cache::DatasetCache;
//! use pollcache::config::DEFAULT_DATA_URL;
//! use pollcache::storage::FileStore;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let backend = ApiClient::new(DEFAULT_DATA_URL)?;
//! let mut cache = DatasetCache::new(backend, FileStore::open_default());
//! cache.init().await;
//! assert!(cache.is_ready());
//! let forecast = cache.get();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod storage;

pub use api::{ApiClient, ApiError, ForecastBackend};
pub use cache::{CacheError, CacheState, DatasetCache};
pub use models::{Component, ForecastResponse, Record};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
