//! The freshness-aware cache controller.
//!
//! `DatasetCache` owns the in-memory snapshot for one page session.
//! On `init` it either restores the snapshot from persistent storage
//! (when a fresh copy exists) or bootstraps it from the backend, one
//! concurrent fetch per component. Completed fetches are processed
//! one at a time after the fan-in, so the pending counter and the
//! snapshot have a single writer and need no locking.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::api::{ApiError, ForecastBackend};
use crate::config::{FRESHNESS_WINDOW_HOURS, LAST_UPDATE_KEY};
use crate::models::{combined_name, Component, ForecastResponse, Record};
use crate::storage::KeyValueStore;

use super::CacheError;

/// Lifecycle of the cache within one session. Readiness is monotonic:
/// there is no transition out of `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    Loading,
    Ready,
}

/// In-memory snapshot: canonical component name to its record series.
/// A component present in the snapshot always holds normalized
/// records (malformed fields excepted, which stay raw and are
/// recorded as faults).
#[derive(Debug, Default)]
pub struct Snapshot {
    components: HashMap<Component, Vec<Record>>,
}

impl Snapshot {
    pub fn records(&self, component: Component) -> Option<&[Record]> {
        self.components.get(&component).map(Vec::as_slice)
    }

    fn records_mut(&mut self, component: Component) -> Option<&mut Vec<Record>> {
        self.components.get_mut(&component)
    }

    fn insert(&mut self, component: Component, records: Vec<Record>) {
        self.components.insert(component, records);
    }
}

/// Freshness-aware loader and holder of the forecast snapshot.
///
/// Generic over the fetch seam (`B`) and the storage substrate (`S`);
/// storage is optional and its absence is handled silently.
pub struct DatasetCache<B, S> {
    backend: B,
    storage: Option<S>,
    snapshot: Option<Snapshot>,
    /// Component loads dispatched but not yet completed. Signed:
    /// refreshes after readiness may push it below zero, and anything
    /// at or below zero counts as ready.
    pending: i32,
    ready: bool,
    faults: Vec<CacheError>,
}

impl<B, S> DatasetCache<B, S>
where
    B: ForecastBackend,
    S: KeyValueStore,
{
    pub fn new(backend: B, storage: Option<S>) -> Self {
        Self {
            backend,
            storage,
            snapshot: None,
            pending: 0,
            ready: false,
            faults: Vec::new(),
        }
    }

    /// Load the snapshot, once per session. Restores from storage when
    /// a fresh persisted copy exists, otherwise bootstraps every
    /// component from the backend. A second call is a no-op.
    pub async fn init(&mut self) {
        if self.snapshot.is_some() {
            return;
        }
        if self.storage.is_none() {
            debug!("No persistent storage; snapshot will not survive the session");
            self.faults.push(CacheError::StorageUnavailable);
        }
        if self.is_storage_fresh() {
            self.load_from_storage().await;
        } else {
            self.load_from_remote().await;
        }
    }

    /// True once every dispatched component load has completed. Also
    /// true before anything was ever dispatched.
    pub fn is_ready(&self) -> bool {
        self.ready || self.pending <= 0
    }

    pub fn state(&self) -> CacheState {
        if self.snapshot.is_none() {
            CacheState::Uninitialized
        } else if self.is_ready() {
            CacheState::Ready
        } else {
            CacheState::Loading
        }
    }

    /// Non-fatal faults collected while loading.
    pub fn faults(&self) -> &[CacheError] {
        &self.faults
    }

    pub fn storage(&self) -> Option<&S> {
        self.storage.as_ref()
    }

    /// Re-fetch a single component from the backend. Safe to call
    /// after readiness; the counter may drop below zero, which still
    /// reads as ready.
    pub async fn refresh_component(&mut self, component: Component) {
        self.snapshot.get_or_insert_with(Snapshot::default);
        self.fetch_components(&[component]).await;
    }

    /// True iff storage holds a last-update timestamp younger than the
    /// freshness window. Age is measured from the most recently
    /// completed fetch; exactly at the window boundary counts stale.
    fn is_storage_fresh(&self) -> bool {
        let Some(storage) = self.storage.as_ref() else {
            return false;
        };
        let stamp = match storage.get(LAST_UPDATE_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return false,
            Err(e) => {
                debug!(error = %e, "Failed to read last-update timestamp");
                return false;
            }
        };
        let last_update = match DateTime::parse_from_rfc3339(&stamp) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(e) => {
                warn!(stamp = %stamp, error = %e, "Unparseable last-update timestamp");
                return false;
            }
        };
        Utc::now().signed_duration_since(last_update) < Duration::hours(FRESHNESS_WINDOW_HOURS)
    }

    /// Restore the snapshot from storage, in enumeration order.
    /// Components missing from storage (or unreadable) fall back to
    /// single-component fetches.
    async fn load_from_storage(&mut self) {
        info!("Restoring snapshot from local storage");
        self.snapshot = Some(Snapshot::default());

        let mut missing = Vec::new();
        for component in Component::ALL {
            match self.read_stored(component) {
                Some(records) => {
                    if let Some(snapshot) = self.snapshot.as_mut() {
                        snapshot.insert(component, records);
                    }
                    self.prepare_component(component);
                }
                None => missing.push(component),
            }
        }

        if !missing.is_empty() {
            debug!(count = missing.len(), "Components missing from storage, fetching");
            self.fetch_components(&missing).await;
        }
        self.ready = self.pending <= 0;
    }

    /// Bootstrap every component from the backend.
    async fn load_from_remote(&mut self) {
        info!(components = Component::ALL.len(), "Bootstrapping snapshot from backend");
        self.snapshot.get_or_insert_with(Snapshot::default);
        self.fetch_components(&Component::ALL).await;
    }

    /// Dispatch one fetch per component, concurrently, and process the
    /// completions. The pending counter is raised before dispatch;
    /// each completion lowers it by one and recomputes readiness.
    /// Completion order across components carries no meaning.
    async fn fetch_components(&mut self, components: &[Component]) {
        self.pending += components.len() as i32;
        let results = {
            let backend = &self.backend;
            join_all(
                components
                    .iter()
                    .map(|c| backend.fetch_component(c.as_str())),
            )
            .await
        };
        for (component, result) in components.iter().zip(results) {
            self.finish_fetch(*component, result);
        }
    }

    /// Per-completion bookkeeping. A failed fetch is recorded and
    /// still counts as completed, so one dead component cannot hold
    /// readiness hostage.
    fn finish_fetch(&mut self, component: Component, result: Result<ForecastResponse, ApiError>) {
        match result {
            Ok(response) => self.store_response(response),
            Err(source) => {
                warn!(component = %component, error = %source, "Component fetch failed");
                self.faults.push(CacheError::FetchFailed { component, source });
            }
        }
        self.pending -= 1;
        self.ready = self.pending <= 0;
    }

    /// Install one backend response: resolve the canonical component,
    /// persist the raw series and bump the last-update timestamp, then
    /// normalize in place. The timestamp moves on every completed
    /// response, so freshness is always measured from the most recent
    /// one.
    fn store_response(&mut self, response: ForecastResponse) {
        let Some(component) = Component::from_remote(&response.kind) else {
            warn!(remote_type = %response.kind, "Discarding response for unknown component");
            return;
        };

        if let Some(storage) = self.storage.as_mut() {
            match serde_json::to_string(&response.data) {
                Ok(raw) => {
                    if let Err(e) = storage.set(component.as_str(), &raw) {
                        warn!(component = %component, error = %e, "Failed to persist component");
                    }
                    if let Err(e) = storage.set(LAST_UPDATE_KEY, &Utc::now().to_rfc3339()) {
                        warn!(error = %e, "Failed to persist last-update timestamp");
                    }
                }
                Err(e) => warn!(component = %component, error = %e, "Failed to serialize component"),
            }
        }

        self.snapshot
            .get_or_insert_with(Snapshot::default)
            .insert(component, response.data);
        self.prepare_component(component);
    }

    fn read_stored(&self, component: Component) -> Option<Vec<Record>> {
        let storage = self.storage.as_ref()?;
        match storage.get(component.as_str()) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(records) => Some(records),
                Err(e) => {
                    warn!(component = %component, error = %e, "Discarding unreadable stored entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(component = %component, error = %e, "Failed to read stored entry");
                None
            }
        }
    }

    /// Normalize a component's series in place. No-op when the
    /// snapshot has no entry for it. Records with malformed fields
    /// stay as delivered and are recorded as faults.
    fn prepare_component(&mut self, component: Component) {
        let Some(snapshot) = self.snapshot.as_mut() else {
            return;
        };
        let Some(records) = snapshot.records_mut(component) else {
            return;
        };
        for record in records.iter_mut() {
            if let Err(source) = record.normalize() {
                warn!(
                    component = %component,
                    field = source.field,
                    "Malformed record left unnormalized"
                );
                self.faults
                    .push(CacheError::MalformedRecord { component, source });
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The combined PollyVote forecast over time. Empty until loaded.
    pub fn get(&self) -> &[Record] {
        self.get_single(Component::Pollyvote.as_str())
    }

    /// Series for a single component name. Empty for names outside the
    /// fixed enumeration and for components not loaded yet.
    pub fn get_single(&self, component: &str) -> &[Record] {
        let Some(component) = Component::parse(component) else {
            return &[];
        };
        self.snapshot
            .as_ref()
            .and_then(|s| s.records(component))
            .unwrap_or(&[])
    }

    /// Aggregated series for a component: looks up the combined
    /// variant of `component`, or `component` itself when it already
    /// names a combined variant.
    pub fn get_component(&self, component: &str) -> &[Record] {
        self.get_single(&combined_name(component))
    }

    /// State-level forecast. Part of the public contract, but the
    /// current backend serves no state-level data; always `None`.
    pub fn get_state(&self, _state: &str) -> Option<&[Record]> {
        None
    }

    /// State-level series for a single component; always `None`, see
    /// [`DatasetCache::get_state`].
    pub fn get_state_component(&self, _state: &str, _component: &str) -> Option<&[Record]> {
        None
    }

    /// State-level series for a single element within a component;
    /// always `None`, see [`DatasetCache::get_state`].
    pub fn get_state_single(
        &self,
        _state: &str,
        _component: &str,
        _single: &str,
    ) -> Option<&[Record]> {
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
