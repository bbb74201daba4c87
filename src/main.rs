//! pollcache CLI - load the forecast snapshot and print a summary.
//!
//! Mostly a smoke-test harness for the library: it runs one full
//! init (storage restore or remote bootstrap, depending on cache
//! age) and reports what ended up in the snapshot.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pollcache::api::ApiClient;
use pollcache::cache::DatasetCache;
use pollcache::config::DEFAULT_DATA_URL;
use pollcache::models::Component;
use pollcache::storage::FileStore;

/// Initialize the tracing subscriber for logging.
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let base_url =
        std::env::var("POLLCACHE_DATA_URL").unwrap_or_else(|_| DEFAULT_DATA_URL.to_string());
    info!(%base_url, "pollcache starting");

    let backend = ApiClient::new(base_url)?;
    let storage = FileStore::open_default();
    if storage.is_none() {
        eprintln!("warning: no cache directory available, running without persistence");
    }

    let mut cache = DatasetCache::new(backend, storage);
    cache.init().await;

    for component in Component::ALL {
        let records = cache.get_single(component.as_str());
        let kind = if component.is_combined() {
            "combined"
        } else {
            "single"
        };
        println!(
            "{:<24} {:<8} {:>5} records",
            component.as_str(),
            kind,
            records.len()
        );
    }

    if let Some(latest) = cache.get().last() {
        println!(
            "\nlatest forecast ({}): D {} / R {}",
            latest.fcdate, latest.fcdemvs, latest.fcrepvs
        );
    }

    for fault in cache.faults() {
        eprintln!("fault: {}", fault);
    }

    Ok(())
}
