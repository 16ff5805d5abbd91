//! (score, ceiling) -> final view, and the per-symbol decision pipeline.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::FetchError;
use crate::models::decision::{GateCeiling, View, ViewDecision};
use crate::models::quote::{IndexSnapshot, RawQuote};
use crate::signals::gates::evaluate_gates;
use crate::signals::normalizer::normalize;
use crate::signals::scoring::score;

/// Mechanical view capped by the gate ceiling.
pub fn final_view(mechanical: View, ceiling: &GateCeiling) -> View {
    mechanical.min(ceiling.ceiling)
}

/// Normal path: normalize, then score and gate the same signals.
pub fn classify(
    symbol: &str,
    quote: &RawQuote,
    index: Option<&IndexSnapshot>,
    now: DateTime<Utc>,
) -> ViewDecision {
    let signals = normalize(quote, index, now);
    let score = score(&signals);
    let ceiling = evaluate_gates(quote, &signals, now);

    let mechanical = View::from_score(score.score);
    let view = final_view(mechanical, &ceiling);

    debug!(
        symbol = %symbol,
        score = score.score,
        mechanical = %mechanical,
        ceiling = %ceiling.ceiling,
        view = %view,
        "classified {}",
        symbol
    );

    ViewDecision {
        symbol: symbol.to_string(),
        view,
        mechanical_view: Some(mechanical),
        score: Some(score),
        signals: Some(signals),
        capped: view < mechanical,
        gate_reasons: ceiling.reasons,
        error: None,
    }
}

/// Fetch-failure path: AVOID, no score, reason carried by the error.
pub fn classify_failure(symbol: &str, error: FetchError) -> ViewDecision {
    ViewDecision {
        symbol: symbol.to_string(),
        view: View::Avoid,
        mechanical_view: None,
        score: None,
        signals: None,
        gate_reasons: Vec::new(),
        capped: false,
        error: Some(error),
    }
}

pub fn classify_outcome(
    symbol: &str,
    outcome: &Result<RawQuote, FetchError>,
    index: Option<&IndexSnapshot>,
    now: DateTime<Utc>,
) -> ViewDecision {
    match outcome {
        Ok(quote) => classify(symbol, quote, index, now),
        Err(error) => classify_failure(symbol, error.clone()),
    }
}
