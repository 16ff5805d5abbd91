//! Bounded-concurrency quote fetching.
//!
//! A fixed pool of `concurrency` workers pulls symbol positions from a shared
//! cursor and performs exactly one timed fetch per symbol. Results come back
//! over a channel tagged with the symbol's position, and each position owns
//! one slot in the output, so completion order never affects output order.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join_all;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::metrics::Metrics;
use crate::models::quote::{IndexSnapshot, RawQuote};
use crate::services::market_data::QuoteProvider;

pub type FetchOutcome = Result<RawQuote, FetchError>;

pub struct FetchDispatcher {
    provider: Arc<dyn QuoteProvider>,
    concurrency: usize,
    timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl FetchDispatcher {
    pub fn new(provider: Arc<dyn QuoteProvider>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            provider,
            concurrency: concurrency.max(1),
            timeout,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fetch every symbol once. The result has one entry per input symbol,
    /// in input order.
    pub async fn dispatch(&self, symbols: &[String]) -> Vec<(String, FetchOutcome)> {
        if symbols.is_empty() {
            return Vec::new();
        }

        let symbols: Arc<[String]> = symbols.to_vec().into();
        let cursor = Arc::new(AtomicUsize::new(0));
        let (tx, mut rx) = mpsc::unbounded_channel::<(usize, FetchOutcome)>();
        let workers = self.concurrency.min(symbols.len());

        info!(
            symbols = symbols.len(),
            workers = workers,
            timeout_ms = self.timeout.as_millis() as u64,
            "dispatching quote fetches for {} symbols",
            symbols.len()
        );

        let mut handles = Vec::with_capacity(workers);
        for worker_id in 0..workers {
            let symbols = symbols.clone();
            let cursor = cursor.clone();
            let tx = tx.clone();
            let provider = self.provider.clone();
            let metrics = self.metrics.clone();
            let timeout = self.timeout;

            handles.push(tokio::spawn(async move {
                loop {
                    let position = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(symbol) = symbols.get(position) else {
                        break;
                    };
                    debug!(worker = worker_id, symbol = %symbol, "worker picked symbol");
                    let outcome =
                        fetch_one(provider.as_ref(), symbol, timeout, metrics.as_deref()).await;
                    if tx.send((position, outcome)).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(tx);

        let mut slots: Vec<Option<FetchOutcome>> = (0..symbols.len()).map(|_| None).collect();
        while let Some((position, outcome)) = rx.recv().await {
            slots[position] = Some(outcome);
        }

        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!(error = %e, "fetch worker terminated abnormally");
            }
        }

        symbols
            .iter()
            .zip(slots)
            .map(|(symbol, slot)| {
                let outcome = slot.unwrap_or_else(|| {
                    Err(FetchError::network(format!(
                        "fetch worker for {} stopped before completing",
                        symbol
                    )))
                });
                (symbol.clone(), outcome)
            })
            .collect()
    }

    /// Single timed fetch of the reference index.
    pub async fn fetch_index(&self, index: &str, timeout: Duration) -> Result<IndexSnapshot, FetchError> {
        match tokio::time::timeout(timeout, self.provider.fetch_index_change(index)).await {
            Ok(Ok(snapshot)) => Ok(snapshot),
            Ok(Err(e)) => {
                warn!(index = %index, error = %e, "index fetch failed; relative strength unavailable");
                Err(e)
            }
            Err(_) => {
                warn!(
                    index = %index,
                    timeout_ms = timeout.as_millis() as u64,
                    "index fetch timed out; relative strength unavailable"
                );
                Err(FetchError::timeout(format!(
                    "no index change for {} within {}ms",
                    index,
                    timeout.as_millis()
                )))
            }
        }
    }
}

async fn fetch_one(
    provider: &dyn QuoteProvider,
    symbol: &str,
    timeout: Duration,
    metrics: Option<&Metrics>,
) -> FetchOutcome {
    let start = Instant::now();
    let outcome = match tokio::time::timeout(timeout, provider.fetch_quote(symbol)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::timeout(format!(
            "no quote for {} within {}ms",
            symbol,
            timeout.as_millis()
        ))),
    };
    let elapsed = start.elapsed();

    if let Some(metrics) = metrics {
        metrics
            .symbol_fetch_duration_seconds
            .observe(elapsed.as_secs_f64());
        if let Err(e) = &outcome {
            metrics.record_fetch_error(e.kind);
        }
    }

    match &outcome {
        Ok(_) => debug!(
            symbol = %symbol,
            elapsed_ms = elapsed.as_millis() as u64,
            "quote fetched"
        ),
        Err(e) => warn!(
            symbol = %symbol,
            kind = %e.kind,
            elapsed_ms = elapsed.as_millis() as u64,
            error = %e.message,
            "quote fetch failed"
        ),
    }

    outcome
}
