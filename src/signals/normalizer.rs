//! Raw quote + index snapshot -> canonical signals.
//!
//! Any signal whose inputs are missing comes out as `None` (or
//! [`Liquidity::Unknown`]); nothing is defaulted to a neutral value.

use chrono::{DateTime, Utc};

use crate::models::quote::{IndexSnapshot, RawQuote};
use crate::models::signals::{CanonicalSignals, Liquidity};
use crate::signals::session::is_session_open;

/// Price within this % of the day high/low counts as "near".
pub const NEAR_DAY_EXTREME_PCT: f64 = 0.2;
/// Price at or above `wk52High * (1 - 0.5%)` is in breakout vicinity.
pub const WEEK52_NEAR_FACTOR: f64 = 0.995;
pub const SPREAD_GOOD_PCT: f64 = 0.25;
/// Applicable margin rate (%) above which margin is considered elevated.
pub const MARGIN_ELEVATED_PCT: f64 = 75.0;

pub fn normalize(
    quote: &RawQuote,
    index: Option<&IndexSnapshot>,
    now: DateTime<Utc>,
) -> CanonicalSignals {
    CanonicalSignals {
        price: quote.ltp,
        change_pct: quote.change_pct,
        vwap_deviation_pct: vwap_deviation_pct(quote.ltp, quote.vwap),
        relative_strength_pct: relative_strength_pct(quote.change_pct, index),
        momentum_pct: quote.change_pct,
        order_imbalance_ratio: order_imbalance_ratio(quote.total_buy_qty, quote.total_sell_qty),
        near_day_or_week_high: near_day_or_week_high(quote),
        near_day_or_week_low: near_day_or_week_low(quote),
        liquidity: liquidity(quote.spread_pct, quote.volume, quote.median_volume_20d),
        circuit_proximity_pct: upper_circuit_proximity_pct(quote.ltp, quote.upper_band),
        lower_circuit_proximity_pct: lower_circuit_proximity_pct(quote.ltp, quote.lower_band),
        margin_elevated: quote.margin_rate.map(|rate| rate > MARGIN_ELEVATED_PCT),
        session_open: is_session_open(now),
    }
}

pub fn vwap_deviation_pct(ltp: Option<f64>, vwap: Option<f64>) -> Option<f64> {
    match (ltp, vwap) {
        (Some(ltp), Some(vwap)) if vwap != 0.0 => Some(100.0 * (ltp - vwap) / vwap),
        _ => None,
    }
}

pub fn relative_strength_pct(change_pct: Option<f64>, index: Option<&IndexSnapshot>) -> Option<f64> {
    Some(change_pct? - index?.change_pct)
}

/// Buy/sell quantity ratio; the sell side is floored at 1.
pub fn order_imbalance_ratio(buy_qty: Option<f64>, sell_qty: Option<f64>) -> Option<f64> {
    Some(buy_qty? / sell_qty?.max(1.0))
}

/// 0 when price is at or above the band.
pub fn upper_circuit_proximity_pct(ltp: Option<f64>, upper_band: Option<f64>) -> Option<f64> {
    let (ltp, upper) = (ltp?, upper_band?);
    if upper <= 0.0 {
        return None;
    }
    if ltp >= upper {
        Some(0.0)
    } else {
        Some(100.0 * (upper - ltp) / upper)
    }
}

/// 0 when price is at or below the band.
pub fn lower_circuit_proximity_pct(ltp: Option<f64>, lower_band: Option<f64>) -> Option<f64> {
    let (ltp, lower) = (ltp?, lower_band?);
    if lower <= 0.0 || ltp <= 0.0 {
        return None;
    }
    if ltp <= lower {
        Some(0.0)
    } else {
        Some(100.0 * (ltp - lower) / ltp)
    }
}

pub fn liquidity(spread_pct: Option<f64>, volume: Option<f64>, median_volume: Option<f64>) -> Liquidity {
    let (Some(median), Some(spread), Some(volume)) = (median_volume, spread_pct, volume) else {
        return Liquidity::Unknown;
    };
    if spread <= SPREAD_GOOD_PCT && volume > median {
        Liquidity::Pass
    } else {
        Liquidity::Fail
    }
}

fn near_day_or_week_high(quote: &RawQuote) -> Option<bool> {
    let near_day = match (quote.ltp, quote.day_high) {
        (Some(ltp), Some(high)) if ltp > 0.0 && high > 0.0 => {
            Some((high - ltp) / ltp * 100.0 <= NEAR_DAY_EXTREME_PCT)
        }
        _ => None,
    };
    let near_week = match (quote.ltp, quote.week52_high) {
        (Some(ltp), Some(high)) if high > 0.0 => Some(ltp >= high * WEEK52_NEAR_FACTOR),
        _ => None,
    };
    any_of(near_day, near_week)
}

fn near_day_or_week_low(quote: &RawQuote) -> Option<bool> {
    let near_day = match (quote.ltp, quote.day_low) {
        (Some(ltp), Some(low)) if ltp > 0.0 && low > 0.0 => {
            Some((ltp - low) / ltp * 100.0 <= NEAR_DAY_EXTREME_PCT)
        }
        _ => None,
    };
    let near_week = match (quote.ltp, quote.week52_low) {
        (Some(ltp), Some(low)) if low > 0.0 => Some(ltp <= low * (2.0 - WEEK52_NEAR_FACTOR)),
        _ => None,
    };
    any_of(near_day, near_week)
}

/// Three-valued OR: a known `true` wins, otherwise unknown is contagious.
fn any_of(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}
