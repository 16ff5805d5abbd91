//! Scan entry point: watchlist in, report out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::ScanConfig;
use crate::core::dispatcher::FetchDispatcher;
use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::decision::View;
use crate::models::watchlist::Watchlist;
use crate::report::{IndexContext, ScanReport};
use crate::services::market_data::QuoteProvider;
use crate::signals::classifier::classify_outcome;

/// Runs independent scans with one fixed configuration.
///
/// Holds no state between scans; every call fetches fresh quotes.
pub struct Scanner {
    provider: Arc<dyn QuoteProvider>,
    config: ScanConfig,
    metrics: Option<Arc<Metrics>>,
}

impl Scanner {
    pub fn new(provider: Arc<dyn QuoteProvider>, config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub async fn scan(&self, watchlist: &Watchlist) -> ScanReport {
        self.scan_at(watchlist, Utc::now()).await
    }

    /// Scan with an explicit wall clock for session gating.
    pub async fn scan_at(&self, watchlist: &Watchlist, now: DateTime<Utc>) -> ScanReport {
        let mut dispatcher = FetchDispatcher::new(
            self.provider.clone(),
            self.config.concurrency_limit,
            self.config.per_symbol_timeout,
        );
        if let Some(metrics) = &self.metrics {
            dispatcher = dispatcher.with_metrics(metrics.clone());
        }

        let (index_outcome, fetched) = tokio::join!(
            dispatcher.fetch_index(watchlist.index(), self.config.index_timeout),
            dispatcher.dispatch(watchlist.symbols()),
        );

        let index_snapshot = index_outcome.as_ref().ok();
        let decisions: Vec<_> = fetched
            .iter()
            .map(|(symbol, outcome)| classify_outcome(symbol, outcome, index_snapshot, now))
            .collect();

        let report = ScanReport::new(
            now,
            IndexContext::from_outcome(watchlist.index(), &index_outcome),
            decisions,
        );

        if let Some(metrics) = &self.metrics {
            metrics.scans_total.inc();
            metrics
                .symbols_scanned_total
                .inc_by(report.decisions.len() as u64);
            for decision in &report.decisions {
                metrics.record_view(decision.view);
            }
        }

        info!(
            symbols = report.decisions.len(),
            buy = report.count(View::Buy),
            watch = report.count(View::Watch),
            avoid = report.count(View::Avoid),
            index = %report.index.name,
            "scan complete"
        );

        report
    }
}
