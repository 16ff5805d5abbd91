//! Intraday watchlist screener.
//!
//! Fetches live quotes for a watchlist under bounded concurrency, derives
//! intraday signals, scores them on a 0-7 scale, applies risk/session gates
//! and classifies each symbol as BUY, WATCH or AVOID.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod report;
pub mod services;
pub mod signals;

pub use error::{FetchError, FetchErrorKind, Result, ScanError};
