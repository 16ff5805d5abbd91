//! End-to-end classification scenarios over the pure pipeline

use intrascan::models::{
    CanonicalSignals, Criterion, CriterionOutcome, GateReason, Liquidity, RawQuote, View,
};
use intrascan::signals::{classify, evaluate_gates, final_view, score};

use crate::fixtures::{nifty, session_closed, session_open, strong_quote, strong_signals, weak_quote};

fn view_for(signals: &CanonicalSignals, now: chrono::DateTime<chrono::Utc>) -> (u8, View, View) {
    let result = score(signals);
    let mechanical = View::from_score(result.score);
    let ceiling = evaluate_gates(&RawQuote::new("TEST"), signals, now);
    (result.score, mechanical, final_view(mechanical, &ceiling))
}

#[test]
fn full_marks_without_gates_is_buy() {
    let (score, mechanical, view) = view_for(&strong_signals(), session_open());
    assert_eq!(score, 7);
    assert_eq!(mechanical, View::Buy);
    assert_eq!(view, View::Buy);
}

#[test]
fn nothing_met_with_unknown_liquidity_is_avoid() {
    let signals = CanonicalSignals {
        vwap_deviation_pct: Some(-0.4),
        relative_strength_pct: Some(-0.2),
        momentum_pct: Some(0.3),
        order_imbalance_ratio: Some(0.8),
        near_day_or_week_high: Some(false),
        liquidity: Liquidity::Unknown,
        circuit_proximity_pct: Some(6.0),
        margin_elevated: Some(true),
        ..strong_signals()
    };
    let result = score(&signals);
    assert_eq!(result.score, 0);
    assert_eq!(
        result.outcome(Criterion::Liquidity),
        Some(CriterionOutcome::Skipped)
    );
    for criterion in Criterion::ALL
        .iter()
        .filter(|c| **c != Criterion::Liquidity)
    {
        assert_eq!(result.outcome(*criterion), Some(CriterionOutcome::NotMet));
    }

    let (_, _, view) = view_for(&signals, session_open());
    assert_eq!(view, View::Avoid);
}

#[test]
fn circuit_gate_caps_six_point_buy_to_watch() {
    let signals = CanonicalSignals {
        circuit_proximity_pct: Some(0.3),
        ..strong_signals()
    };
    let (score, mechanical, view) = view_for(&signals, session_open());
    assert_eq!(score, 6);
    assert_eq!(mechanical, View::Buy);
    assert_eq!(view, View::Watch);
}

#[test]
fn closed_session_caps_full_marks_to_watch() {
    let (score, mechanical, view) = view_for(&strong_signals(), session_closed());
    assert_eq!(score, 7);
    assert_eq!(mechanical, View::Buy);
    assert_eq!(view, View::Watch);
}

#[test]
fn closed_session_decision_carries_the_reason() {
    let decision = classify("INFY", &strong_quote("INFY"), Some(&nifty(1.3)), session_closed());
    assert_eq!(decision.view, View::Watch);
    assert!(decision.capped);
    assert_eq!(decision.gate_reasons, vec![GateReason::SessionClosed]);
    assert_eq!(decision.reason().as_deref(), Some("market session closed"));
}

#[test]
fn classification_is_deterministic() {
    for quote in [strong_quote("INFY"), weak_quote("IDEA")] {
        let first = classify(&quote.symbol, &quote, Some(&nifty(0.4)), session_open());
        let second = classify(&quote.symbol, &quote, Some(&nifty(0.4)), session_open());
        assert_eq!(first, second);
    }
}

#[test]
fn missing_inputs_never_score_as_met() {
    let bare = RawQuote {
        ltp: Some(100.0),
        ..RawQuote::new("BARE")
    };
    let decision = classify("BARE", &bare, None, session_open());
    let result = decision.score.expect("quote path always scores");
    assert_eq!(result.score, 0);
    assert_eq!(result.skipped().count(), 7);
    assert_eq!(decision.view, View::Avoid);
}

#[test]
fn absent_median_volume_skips_liquidity_instead_of_failing_it() {
    let without_median = RawQuote {
        median_volume_20d: None,
        ..strong_quote("INFY")
    };
    let with_high_median = RawQuote {
        median_volume_20d: Some(3_000_000.0),
        ..strong_quote("INFY")
    };

    let skipped = classify("INFY", &without_median, Some(&nifty(1.3)), session_open());
    let failed = classify("INFY", &with_high_median, Some(&nifty(1.3)), session_open());
    let skipped_score = skipped.score.expect("scored");
    let failed_score = failed.score.expect("scored");

    assert_eq!(
        skipped_score.outcome(Criterion::Liquidity),
        Some(CriterionOutcome::Skipped)
    );
    assert_eq!(
        failed_score.outcome(Criterion::Liquidity),
        Some(CriterionOutcome::NotMet)
    );
    assert_eq!(skipped_score.score, 6);
    assert_eq!(failed_score.score, 6);
    for criterion in Criterion::ALL {
        if criterion != Criterion::Liquidity {
            assert_eq!(
                skipped_score.outcome(criterion),
                failed_score.outcome(criterion),
                "{criterion:?}"
            );
        }
    }
    assert_eq!(skipped.view, failed.view);
}
