//! Unit tests for view classification

use intrascan::error::FetchError;
use intrascan::models::{GateCeiling, GateReason, View};
use intrascan::signals::{classify, classify_failure, classify_outcome, final_view};

use crate::fixtures::{nifty, session_open, strong_quote, weak_quote};

#[test]
fn score_bands_map_to_views() {
    assert_eq!(View::from_score(0), View::Avoid);
    assert_eq!(View::from_score(1), View::Avoid);
    assert_eq!(View::from_score(2), View::Watch);
    assert_eq!(View::from_score(5), View::Watch);
    assert_eq!(View::from_score(6), View::Buy);
    assert_eq!(View::from_score(7), View::Buy);
}

#[test]
fn final_view_is_minimum_of_mechanical_and_ceiling() {
    let mut ceiling = GateCeiling::unrestricted();
    assert_eq!(final_view(View::Buy, &ceiling), View::Buy);

    ceiling.restrict(View::Watch, GateReason::FnoBan);
    assert_eq!(final_view(View::Buy, &ceiling), View::Watch);
    assert_eq!(final_view(View::Watch, &ceiling), View::Watch);
    assert_eq!(final_view(View::Avoid, &ceiling), View::Avoid);
}

#[test]
fn strong_quote_classifies_buy_uncapped() {
    let decision = classify("INFY", &strong_quote("INFY"), Some(&nifty(1.3)), session_open());
    assert_eq!(decision.view, View::Buy);
    assert_eq!(decision.mechanical_view, Some(View::Buy));
    assert_eq!(decision.score_value(), 7);
    assert!(!decision.capped);
    assert_eq!(decision.reason(), None);
}

#[test]
fn weak_quote_classifies_avoid() {
    let decision = classify("IDEA", &weak_quote("IDEA"), Some(&nifty(1.3)), session_open());
    assert_eq!(decision.view, View::Avoid);
    assert_eq!(decision.score_value(), 0);
}

#[test]
fn gate_that_does_not_bind_is_recorded_but_not_capping() {
    let quote = intrascan::models::RawQuote {
        fno_ban: Some(true),
        ..weak_quote("IDEA")
    };
    let decision = classify("IDEA", &quote, Some(&nifty(1.3)), session_open());
    assert_eq!(decision.view, View::Avoid);
    assert_eq!(decision.gate_reasons, vec![GateReason::FnoBan]);
    assert!(!decision.capped);
}

#[test]
fn provider_supplied_fno_ban_caps_buy_at_watch() {
    let quote = intrascan::models::RawQuote {
        fno_ban: Some(true),
        ..strong_quote("INFY")
    };
    let decision = classify("INFY", &quote, Some(&nifty(1.3)), session_open());
    assert_eq!(decision.mechanical_view, Some(View::Buy));
    assert_eq!(decision.view, View::Watch);
    assert_eq!(decision.gate_reasons, vec![GateReason::FnoBan]);
    assert!(decision.capped);
}

#[test]
fn fetch_failure_is_avoid_with_error_kind_reason() {
    let decision = classify_failure("HDFC", FetchError::timeout("no quote within 8000ms"));
    assert_eq!(decision.view, View::Avoid);
    assert!(decision.score.is_none());
    assert!(decision.signals.is_none());
    assert_eq!(decision.reason().as_deref(), Some("FetchTimeout"));
}

#[test]
fn outcome_dispatches_on_result() {
    let ok = classify_outcome("INFY", &Ok(strong_quote("INFY")), None, session_open());
    assert!(ok.error.is_none());
    assert!(ok.relative_strength().is_none());

    let err = classify_outcome(
        "INFY",
        &Err(FetchError::parse("bad payload")),
        None,
        session_open(),
    );
    assert_eq!(err.reason().as_deref(), Some("FetchParseError"));
}
