//! Data models for the forecast cache.
//!
//! - `Component`: the fixed enumeration of forecast datasets, plus the
//!   remote-name mapping table
//! - `Record`: one typed forecast observation, with its normalization
//!   into canonical dates and one-decimal vote shares
//! - `ForecastResponse`: the backend's response envelope

pub mod component;
pub mod record;

pub use component::{combined_name, Component, COMBINED_SUFFIX};
pub use record::{ForecastResponse, MalformedField, Record};
