//! Error types for the scanner.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result alias for fallible scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that abort a whole scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Malformed configuration or watchlist.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScanError {
    pub fn config(msg: impl Into<String>) -> Self {
        ScanError::Config(msg.into())
    }
}

/// Category of a failed single-attempt fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchErrorKind {
    Timeout,
    Network,
    Parse,
}

impl FetchErrorKind {
    /// Reason label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            FetchErrorKind::Timeout => "FetchTimeout",
            FetchErrorKind::Network => "FetchNetworkError",
            FetchErrorKind::Parse => "FetchParseError",
        }
    }

    /// Lowercase name used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Timeout => "timeout",
            FetchErrorKind::Network => "network",
            FetchErrorKind::Parse => "parse",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A per-symbol (or index) fetch failure. Never fatal to a scan.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Parse, message)
    }
}
