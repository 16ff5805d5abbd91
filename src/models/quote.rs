use serde::{Deserialize, Serialize};

/// Exchange filler for "no value", compared case-insensitively after trimming.
pub fn is_placeholder(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "" | "-" | "—" | "na" | "n/a" | "null" | "none"
    )
}

/// Per-symbol quote snapshot as delivered by a quote provider.
///
/// Every field is optional: `None` means the upstream did not supply it,
/// which is not the same thing as a zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ltp: Option<f64>,
    /// Session VWAP (exchange "average price").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vwap: Option<f64>,
    /// % change vs previous close.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week52_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week52_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_buy_qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sell_qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_band: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_band: Option<f64>,
    /// Shares traded so far in the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_volume_20d: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surveillance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fno: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fno_ban: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_volatility: Option<f64>,
    /// Applicable margin rate in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliverable_pct: Option<f64>,
}

impl RawQuote {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Default::default()
        }
    }
}

/// Reference index change, the relative-strength baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub name: String,
    pub change_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<f64>,
}

impl IndexSnapshot {
    pub fn new(name: impl Into<String>, change_pct: f64) -> Self {
        Self {
            name: name.into(),
            change_pct,
            last: None,
        }
    }
}
