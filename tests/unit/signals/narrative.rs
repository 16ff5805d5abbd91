//! Unit tests for the narrative override

use intrascan::models::{View, ViewDecision};
use intrascan::signals::{apply_override, classify, NarrativeAdjustment, Notch};

use crate::fixtures::{nifty, session_closed, session_open, strong_quote, weak_quote};

fn no_news(_: &ViewDecision) -> Option<NarrativeAdjustment> {
    None
}

#[test]
fn adjuster_can_lift_one_notch_with_rationale() {
    let decision = classify("INFY", &strong_quote("INFY"), Some(&nifty(1.3)), session_closed());
    assert_eq!(decision.view, View::Watch);

    let upgrade = |_: &ViewDecision| {
        Some(NarrativeAdjustment {
            notch: Notch::Up,
            rationale: "order win announced".to_string(),
        })
    };
    let adjusted = apply_override(&decision, &upgrade);

    assert_eq!(adjusted.view, View::Buy);
    assert_eq!(adjusted.rationale.as_deref(), Some("order win announced"));
    assert_eq!(adjusted.decision.view, View::Watch);
}

#[test]
fn downgrade_stops_at_avoid() {
    let decision = classify("IDEA", &weak_quote("IDEA"), Some(&nifty(1.3)), session_open());
    let downgrade = |_: &ViewDecision| {
        Some(NarrativeAdjustment {
            notch: Notch::Down,
            rationale: "rating cut".to_string(),
        })
    };
    assert_eq!(apply_override(&decision, &downgrade).view, View::Avoid);
}

#[test]
fn no_adjustment_keeps_the_view() {
    let decision = classify("INFY", &strong_quote("INFY"), Some(&nifty(1.3)), session_open());
    let adjusted = apply_override(&decision, &no_news);
    assert_eq!(adjusted.view, decision.view);
    assert!(adjusted.rationale.is_none());
}
