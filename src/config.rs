//! Static configuration for the forecast cache.
//!
//! Everything here is fixed at build time: the endpoint, the freshness
//! window, and the reserved storage key. The component enumeration
//! itself lives in `models::component`.

/// Application name used for the cache directory path.
pub const APP_NAME: &str = "pollcache";

/// Default URL of the forecast data endpoint.
pub const DEFAULT_DATA_URL: &str =
    "https://pollyvote.com/wp-content/plugins/pollyvote/data/index.php";

/// Hours a persisted snapshot stays fresh. Once the most recent
/// completed fetch is older than this, the next startup refetches
/// everything from the backend.
pub const FRESHNESS_WINDOW_HOURS: i64 = 2;

/// Reserved storage key holding the RFC 3339 timestamp of the most
/// recently completed fetch.
pub const LAST_UPDATE_KEY: &str = "last_update";
