//! Prometheus metrics for scans and the HTTP surface.

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::error::FetchErrorKind;
use crate::models::decision::View;

pub struct Metrics {
    registry: Registry,
    pub scans_total: IntCounter,
    pub symbols_scanned_total: IntCounter,
    pub symbol_fetch_errors_total: IntCounterVec,
    pub symbol_fetch_duration_seconds: Histogram,
    pub scan_views_total: IntCounterVec,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: Gauge,
    pub http_request_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scans_total = IntCounter::new("scans_total", "Completed watchlist scans")?;
        let symbols_scanned_total =
            IntCounter::new("symbols_scanned_total", "Symbols classified across all scans")?;
        let symbol_fetch_errors_total = IntCounterVec::new(
            Opts::new(
                "symbol_fetch_errors_total",
                "Per-symbol quote fetch failures by kind",
            ),
            &["kind"],
        )?;
        let symbol_fetch_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "symbol_fetch_duration_seconds",
                "Wall time of a single quote fetch",
            )
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.0, 4.0, 8.0, 16.0]),
        )?;
        let scan_views_total = IntCounterVec::new(
            Opts::new("scan_views_total", "Final views emitted by scans"),
            &["view"],
        )?;
        let http_requests_total = IntCounter::new("http_requests_total", "HTTP requests served")?;
        let http_requests_in_flight =
            Gauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;

        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(symbols_scanned_total.clone()))?;
        registry.register(Box::new(symbol_fetch_errors_total.clone()))?;
        registry.register(Box::new(symbol_fetch_duration_seconds.clone()))?;
        registry.register(Box::new(scan_views_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            scans_total,
            symbols_scanned_total,
            symbol_fetch_errors_total,
            symbol_fetch_duration_seconds,
            scan_views_total,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
        })
    }

    pub fn record_fetch_error(&self, kind: FetchErrorKind) {
        self.symbol_fetch_errors_total
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn record_view(&self, view: View) {
        self.scan_views_total
            .with_label_values(&[view.as_str()])
            .inc();
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
