use thiserror::Error;

use crate::api::ApiError;
use crate::models::{Component, MalformedField};

/// Faults the cache controller runs into while loading.
///
/// None of these are fatal: the controller logs the fault, records it
/// for inspection via `DatasetCache::faults`, and keeps going so that
/// one bad component never blocks overall readiness.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("persistent storage is not available")]
    StorageUnavailable,

    #[error("fetch failed for {component}")]
    FetchFailed {
        component: Component,
        #[source]
        source: ApiError,
    },

    #[error("malformed record in {component}")]
    MalformedRecord {
        component: Component,
        #[source]
        source: MalformedField,
    },
}
