use serde::{Deserialize, Serialize};

/// Tri-state liquidity verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liquidity {
    Pass,
    Fail,
    /// No 20-day median volume to compare against.
    #[default]
    Unknown,
}

/// Derived per-symbol signals. `None` marks a signal whose inputs were missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalSignals {
    pub price: Option<f64>,
    pub change_pct: Option<f64>,
    pub vwap_deviation_pct: Option<f64>,
    pub relative_strength_pct: Option<f64>,
    pub momentum_pct: Option<f64>,
    pub order_imbalance_ratio: Option<f64>,
    pub near_day_or_week_high: Option<bool>,
    /// Breakdown analog; tracked for reporting, not scored.
    pub near_day_or_week_low: Option<bool>,
    pub liquidity: Liquidity,
    /// Distance to the upper circuit band in percent of the band.
    pub circuit_proximity_pct: Option<f64>,
    /// Distance to the lower circuit band in percent of price.
    pub lower_circuit_proximity_pct: Option<f64>,
    pub margin_elevated: Option<bool>,
    pub session_open: bool,
}
