//! Unit tests for signal normalization

use intrascan::models::{Liquidity, RawQuote};
use intrascan::signals::normalizer::{
    liquidity, lower_circuit_proximity_pct, order_imbalance_ratio, upper_circuit_proximity_pct,
    vwap_deviation_pct,
};
use intrascan::signals::normalize;

use crate::fixtures::{nifty, session_closed, session_open, strong_quote};

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("signal should be present");
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn strong_quote_derives_every_signal() {
    let signals = normalize(&strong_quote("INFY"), Some(&nifty(1.3)), session_open());

    approx(signals.price, 1006.0);
    approx(signals.vwap_deviation_pct, 0.6);
    approx(signals.relative_strength_pct, 1.2);
    approx(signals.momentum_pct, 2.5);
    approx(signals.order_imbalance_ratio, 1.8);
    approx(signals.circuit_proximity_pct, 100.0 * 94.0 / 1100.0);
    approx(signals.lower_circuit_proximity_pct, 100.0 * 106.0 / 1006.0);
    assert_eq!(signals.near_day_or_week_high, Some(true));
    assert_eq!(signals.near_day_or_week_low, Some(false));
    assert_eq!(signals.liquidity, Liquidity::Pass);
    assert_eq!(signals.margin_elevated, Some(false));
    assert!(signals.session_open);
}

#[test]
fn missing_index_leaves_relative_strength_undefined() {
    let signals = normalize(&strong_quote("INFY"), None, session_open());
    assert_eq!(signals.relative_strength_pct, None);
    approx(signals.momentum_pct, 2.5);
}

#[test]
fn session_flag_follows_the_clock() {
    let signals = normalize(&strong_quote("INFY"), Some(&nifty(1.3)), session_closed());
    assert!(!signals.session_open);
}

#[test]
fn zero_vwap_is_undefined_not_zero() {
    assert_eq!(vwap_deviation_pct(Some(100.0), Some(0.0)), None);
    assert_eq!(vwap_deviation_pct(None, Some(100.0)), None);
    approx(vwap_deviation_pct(Some(99.0), Some(100.0)), -1.0);
}

#[test]
fn order_imbalance_floors_sell_side_at_one() {
    approx(order_imbalance_ratio(Some(500.0), Some(0.0)), 500.0);
    approx(order_imbalance_ratio(Some(300.0), Some(200.0)), 1.5);
    assert_eq!(order_imbalance_ratio(Some(300.0), None), None);
}

#[test]
fn circuit_proximity_is_zero_at_or_beyond_the_band() {
    approx(upper_circuit_proximity_pct(Some(110.0), Some(110.0)), 0.0);
    approx(upper_circuit_proximity_pct(Some(112.0), Some(110.0)), 0.0);
    approx(lower_circuit_proximity_pct(Some(90.0), Some(90.0)), 0.0);
    approx(upper_circuit_proximity_pct(Some(100.0), Some(110.0)), 100.0 * 10.0 / 110.0);
    assert_eq!(upper_circuit_proximity_pct(None, Some(110.0)), None);
}

#[test]
fn liquidity_is_unknown_without_median_volume() {
    assert_eq!(liquidity(Some(0.1), Some(5_000.0), None), Liquidity::Unknown);
    assert_eq!(liquidity(None, Some(5_000.0), Some(1_000.0)), Liquidity::Unknown);
}

#[test]
fn liquidity_fails_on_wide_spread_or_thin_volume() {
    assert_eq!(liquidity(Some(0.25), Some(5_000.0), Some(1_000.0)), Liquidity::Pass);
    assert_eq!(liquidity(Some(0.3), Some(5_000.0), Some(1_000.0)), Liquidity::Fail);
    assert_eq!(liquidity(Some(0.1), Some(1_000.0), Some(1_000.0)), Liquidity::Fail);
}

#[test]
fn week52_vicinity_counts_as_near_high() {
    let quote = RawQuote {
        ltp: Some(996.0),
        week52_high: Some(1000.0),
        ..RawQuote::new("TCS")
    };
    let signals = normalize(&quote, None, session_open());
    assert_eq!(signals.near_day_or_week_high, Some(true));
}

#[test]
fn near_high_is_unknown_without_reference_highs() {
    let quote = RawQuote {
        ltp: Some(996.0),
        ..RawQuote::new("TCS")
    };
    let signals = normalize(&quote, None, session_open());
    assert_eq!(signals.near_day_or_week_high, None);
}

#[test]
fn elevated_margin_is_flagged() {
    let quote = RawQuote {
        margin_rate: Some(80.0),
        ..RawQuote::new("YESBANK")
    };
    assert_eq!(normalize(&quote, None, session_open()).margin_elevated, Some(true));
    assert_eq!(
        normalize(&RawQuote::new("YESBANK"), None, session_open()).margin_elevated,
        None
    );
}
