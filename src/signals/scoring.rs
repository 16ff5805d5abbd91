//! Seven-point intraday score.
//!
//! Each criterion is worth exactly one point. A criterion whose input is
//! unavailable is `Skipped`, which scores 0 like `NotMet` but stays
//! distinguishable in the output. The denominator is always 7.

use crate::models::score::{Criterion, CriterionOutcome, CriterionResult, ScoreResult};
use crate::models::signals::{CanonicalSignals, Liquidity};

pub const VWAP_BIAS_PCT: f64 = 0.5;
pub const RS_STRONG_PCT: f64 = 1.0;
pub const MOMENTUM_PCT: f64 = 2.0;
pub const OIR_BUY_RATIO: f64 = 1.5;
/// Upper circuit must be strictly further away than this.
pub const CIRCUIT_NEAR_PCT: f64 = 1.0;

pub fn score(signals: &CanonicalSignals) -> ScoreResult {
    let criteria = Criterion::ALL
        .iter()
        .map(|&criterion| CriterionResult {
            criterion,
            outcome: evaluate(criterion, signals),
        })
        .collect();
    ScoreResult::from_outcomes(criteria)
}

fn evaluate(criterion: Criterion, s: &CanonicalSignals) -> CriterionOutcome {
    match criterion {
        Criterion::VwapBias => threshold(s.vwap_deviation_pct, |v| v >= VWAP_BIAS_PCT),
        Criterion::RelativeStrength => threshold(s.relative_strength_pct, |v| v >= RS_STRONG_PCT),
        Criterion::Momentum => threshold(s.momentum_pct, |v| v >= MOMENTUM_PCT),
        Criterion::OrderImbalance => threshold(s.order_imbalance_ratio, |v| v >= OIR_BUY_RATIO),
        Criterion::NearHigh => threshold(s.near_day_or_week_high, |near| near),
        Criterion::Liquidity => match s.liquidity {
            Liquidity::Pass => CriterionOutcome::Awarded,
            Liquidity::Fail => CriterionOutcome::NotMet,
            Liquidity::Unknown => CriterionOutcome::Skipped,
        },
        // An unknown margin flag does not block the point; only a known elevated one does.
        Criterion::CircuitRisk => threshold(s.circuit_proximity_pct, |prox| {
            prox > CIRCUIT_NEAR_PCT && s.margin_elevated != Some(true)
        }),
    }
}

fn threshold<T: Copy>(value: Option<T>, met: impl FnOnce(T) -> bool) -> CriterionOutcome {
    match value {
        None => CriterionOutcome::Skipped,
        Some(v) if met(v) => CriterionOutcome::Awarded,
        Some(_) => CriterionOutcome::NotMet,
    }
}
