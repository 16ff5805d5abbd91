//! Scan configuration.
//!
//! The scanner core never reads process state: binaries build a
//! [`ScanConfig`] (usually via [`ScanConfig::from_env`]) and pass it in.

use crate::error::{Result, ScanError};
use crate::models::decision::View;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 3;
pub const DEFAULT_SYMBOL_TIMEOUT_MS: u64 = 8_000;
pub const DEFAULT_INDEX_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_TOP_N: usize = 5;

/// Which report renderings a run should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTargets {
    Structured,
    Digest,
    Both,
}

impl OutputTargets {
    pub fn structured(&self) -> bool {
        matches!(self, OutputTargets::Structured | OutputTargets::Both)
    }

    pub fn digest(&self) -> bool {
        matches!(self, OutputTargets::Digest | OutputTargets::Both)
    }
}

impl FromStr for OutputTargets {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" | "json" => Ok(OutputTargets::Structured),
            "digest" | "human" => Ok(OutputTargets::Digest),
            "both" => Ok(OutputTargets::Both),
            other => Err(ScanError::config(format!("unknown output target '{}'", other))),
        }
    }
}

/// Options recognised by a scan invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub concurrency_limit: usize,
    pub per_symbol_timeout: Duration,
    pub index_timeout: Duration,
    pub view_filter: Vec<View>,
    pub top_n: usize,
    pub output_targets: OutputTargets,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY,
            per_symbol_timeout: Duration::from_millis(DEFAULT_SYMBOL_TIMEOUT_MS),
            index_timeout: Duration::from_millis(DEFAULT_INDEX_TIMEOUT_MS),
            view_filter: View::ALL.to_vec(),
            top_n: DEFAULT_TOP_N,
            output_targets: OutputTargets::Both,
        }
    }
}

impl ScanConfig {
    pub fn with_concurrency(mut self, concurrency_limit: usize) -> Self {
        self.concurrency_limit = concurrency_limit;
        self
    }

    pub fn with_timeout(mut self, per_symbol_timeout: Duration) -> Self {
        self.per_symbol_timeout = per_symbol_timeout;
        self
    }

    pub fn with_index_timeout(mut self, index_timeout: Duration) -> Self {
        self.index_timeout = index_timeout;
        self
    }

    pub fn with_views(mut self, views: Vec<View>) -> Self {
        self.view_filter = views;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_output(mut self, output_targets: OutputTargets) -> Self {
        self.output_targets = output_targets;
        self
    }

    /// Reject values the dispatcher and reporter cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency_limit == 0 {
            return Err(ScanError::config("concurrency limit must be a positive integer"));
        }
        if self.per_symbol_timeout.is_zero() {
            return Err(ScanError::config("per-symbol timeout must be greater than zero"));
        }
        if self.index_timeout.is_zero() {
            return Err(ScanError::config("index timeout must be greater than zero"));
        }
        if self.top_n == 0 {
            return Err(ScanError::config("topN must be a positive integer"));
        }
        if self.view_filter.is_empty() {
            return Err(ScanError::config("view filter must name at least one view"));
        }
        Ok(())
    }

    /// Build a configuration from `SCAN_*` environment variables.
    ///
    /// Unset variables fall back to defaults; set but malformed values are a
    /// configuration error.
    pub fn from_env() -> Result<Self> {
        let mut config = ScanConfig::default();

        if let Some(concurrency) = env_parse::<usize>("SCAN_CONCURRENCY")? {
            config.concurrency_limit = concurrency;
        }
        if let Some(ms) = env_parse::<u64>("SCAN_TIMEOUT_MS")? {
            config.per_symbol_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>("SCAN_INDEX_TIMEOUT_MS")? {
            config.index_timeout = Duration::from_millis(ms);
        }
        if let Ok(views) = env::var("SCAN_VIEWS") {
            config.view_filter = parse_views(&views)?;
        }
        if let Some(top_n) = env_parse::<usize>("SCAN_TOP_N")? {
            config.top_n = top_n;
        }
        if let Ok(output) = env::var("SCAN_OUTPUT") {
            config.output_targets = output.parse()?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse a comma separated view list such as `"BUY,WATCH"`.
pub fn parse_views(raw: &str) -> Result<Vec<View>> {
    let mut views = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let view: View = part.parse()?;
        if !views.contains(&view) {
            views.push(view);
        }
    }
    Ok(views)
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ScanError::config(format!("{} has an invalid value '{}'", key, raw))),
        Err(_) => Ok(None),
    }
}

/// Deployment environment, used to pick the log format.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_nse_base_url() -> String {
    env::var("NSE_BASE_URL").unwrap_or_else(|_| "https://www.nseindia.com".to_string())
}
