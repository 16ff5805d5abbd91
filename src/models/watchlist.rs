//! Watchlist input: a reference index plus an ordered, deduplicated symbol list.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_INDEX: &str = "NIFTY 50";

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

/// Watchlist as written by users (`watchlist.json` or an API body).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistSpec {
    #[serde(default = "default_index")]
    pub index: String,
    #[serde(default)]
    pub symbols: Vec<String>,
}

impl WatchlistSpec {
    pub fn into_watchlist(self) -> Result<Watchlist> {
        Watchlist::new(self.index, self.symbols)
    }
}

/// Validated watchlist. Symbols are unique and keep first-occurrence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Watchlist {
    index: String,
    symbols: Vec<String>,
}

impl Watchlist {
    pub fn new<I, S>(index: impl Into<String>, symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = index.into().trim().to_string();
        if index.is_empty() {
            return Err(ScanError::config("watchlist reference index is empty"));
        }

        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for raw in symbols {
            let symbol = raw.as_ref().trim().to_ascii_uppercase();
            if symbol.is_empty() {
                continue;
            }
            if seen.insert(symbol.clone()) {
                unique.push(symbol);
            }
        }

        if unique.is_empty() {
            return Err(ScanError::config("watchlist has no symbols"));
        }

        Ok(Self {
            index,
            symbols: unique,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let spec: WatchlistSpec = serde_json::from_str(raw)
            .map_err(|e| ScanError::config(format!("unparsable watchlist: {}", e)))?;
        spec.into_watchlist()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ScanError::config(format!("cannot read watchlist {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
