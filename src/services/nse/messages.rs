//! Exchange quote payloads and their decoding into [`RawQuote`].
//!
//! Numeric fields arrive as numbers or as display strings ("1,234.50",
//! "2.5%", "₹ 10", "-"). Anything that is not a usable number decodes to
//! `None`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::FetchError;
use crate::models::quote::{is_placeholder, IndexSnapshot, RawQuote};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteEquityResponse {
    #[serde(default)]
    pub info: Option<InfoSection>,
    #[serde(default)]
    pub metadata: Option<MetadataSection>,
    #[serde(default)]
    pub security_info: Option<SecurityInfo>,
    #[serde(default)]
    pub price_info: Option<PriceInfo>,
    #[serde(default)]
    pub trade_info: Option<TradeInfo>,
    #[serde(default, rename = "marketDeptOrderBook")]
    pub order_book: Option<OrderBook>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoSection {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default, rename = "isFNOSec", deserialize_with = "lenient_bool")]
    pub is_fno_sec: Option<bool>,
    /// The exchange quote endpoints do not publish a ban flag, so this is
    /// `None` for live payloads and the F&O ban gate stays quiet. A provider
    /// that knows the ban list must set `RawQuote::fno_ban` itself.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_fno_ban: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSection {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    #[serde(default)]
    pub trading_status: Option<String>,
    /// Either a bare string or `{"surv": "...", "desc": "..."}`.
    #[serde(default)]
    pub surveillance: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub p_change: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub vwap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub previous_close: Option<f64>,
    #[serde(default, rename = "upperCP", deserialize_with = "lenient_f64")]
    pub upper_cp: Option<f64>,
    #[serde(default, rename = "lowerCP", deserialize_with = "lenient_f64")]
    pub lower_cp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_traded_volume: Option<f64>,
    #[serde(default)]
    pub intra_day_high_low: Option<HighLow>,
    #[serde(default)]
    pub week_high_low: Option<HighLow>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HighLow {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub daily_volatility: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub applicable_margin_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub delivery_to_traded_quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub traded_volume: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_buy_quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_sell_quantity: Option<f64>,
    #[serde(default)]
    pub bid: Vec<DepthLevel>,
    #[serde(default)]
    pub ask: Vec<DepthLevel>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepthLevel {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteIndexResponse {
    #[serde(default)]
    pub info: Option<IndexInfo>,
    #[serde(default)]
    pub price_info: Option<IndexPriceInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndexInfo {
    #[serde(default)]
    pub index: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPriceInfo {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub p_change: Option<f64>,
}

impl QuoteEquityResponse {
    pub fn into_raw_quote(self, symbol: &str) -> Result<RawQuote, FetchError> {
        let price = self
            .price_info
            .ok_or_else(|| FetchError::parse(format!("quote for {} has no priceInfo", symbol)))?;
        let trade = self.trade_info.unwrap_or_default();
        let book = self.order_book.unwrap_or_default();
        let security = self.security_info.unwrap_or_default();
        let info = self.info.unwrap_or_default();

        let ltp = price.last_price;
        let spread_pct = spread_pct(ltp, &book);
        let intra = price.intra_day_high_low.unwrap_or_default();
        let week = price.week_high_low.unwrap_or_default();

        Ok(RawQuote {
            symbol: info.symbol.unwrap_or_else(|| symbol.to_string()),
            ltp,
            vwap: price.vwap,
            change_pct: price.p_change,
            day_high: intra.max,
            day_low: intra.min,
            week52_high: week.max,
            week52_low: week.min,
            total_buy_qty: book.total_buy_quantity,
            total_sell_qty: book.total_sell_quantity,
            spread_pct,
            upper_band: price.upper_cp,
            lower_band: price.lower_cp,
            volume: price.total_traded_volume.or(trade.traded_volume),
            median_volume_20d: None,
            trading_status: security
                .trading_status
                .or(self.metadata.and_then(|m| m.status)),
            surveillance: security.surveillance.as_ref().and_then(surveillance_text),
            is_fno: info.is_fno_sec,
            fno_ban: info.is_fno_ban,
            daily_volatility: trade.daily_volatility,
            margin_rate: trade.applicable_margin_rate,
            deliverable_pct: trade.delivery_to_traded_quantity,
        })
    }
}

impl QuoteIndexResponse {
    pub fn into_snapshot(self, index: &str) -> Result<IndexSnapshot, FetchError> {
        let price = self
            .price_info
            .ok_or_else(|| FetchError::parse(format!("index {} has no priceInfo", index)))?;
        let change_pct = price
            .p_change
            .ok_or_else(|| FetchError::parse(format!("index {} has no pChange", index)))?;
        Ok(IndexSnapshot {
            name: self
                .info
                .and_then(|i| i.index)
                .unwrap_or_else(|| index.to_string()),
            change_pct,
            last: price.last.or(price.last_price),
        })
    }
}

/// Best ask minus best bid as a % of LTP. Empty book levels report 0.
fn spread_pct(ltp: Option<f64>, book: &OrderBook) -> Option<f64> {
    let ltp = ltp.filter(|p| *p > 0.0)?;
    let bid = book.bid.first()?.price.filter(|p| *p > 0.0)?;
    let ask = book.ask.first()?.price.filter(|p| *p > 0.0)?;
    Some((ask - bid) / ltp * 100.0)
}

fn surveillance_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("surv").and_then(Value::as_str)?,
        _ => return None,
    };
    if is_placeholder(text) {
        None
    } else {
        Some(text.trim().to_string())
    }
}

/// Overlay a sectioned quote payload onto the base payload, top-level key by key.
/// Null section values never replace base values.
pub fn merge_sections(base: &mut Value, section: Value) {
    let (Value::Object(base), Value::Object(section)) = (base, section) else {
        return;
    };
    for (key, value) in section {
        if !value.is_null() {
            base.insert(key, value);
        }
    }
}

/// Parse a display-formatted number, including `Cr` (1e7) and `Lakh` (1e5) units.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    if is_placeholder(raw) {
        return None;
    }
    let mut s: String = raw
        .trim()
        .replace(',', "")
        .replace('%', "")
        .replace('₹', "")
        .replace("Rs.", "")
        .trim()
        .to_string();

    let mut multiplier = 1.0;
    let lower = s.to_ascii_lowercase();
    if let Some(stripped) = ["cr.", "cr"].iter().find_map(|u| lower.strip_suffix(u)) {
        multiplier = 1e7;
        s = stripped.trim().to_string();
    } else if let Some(stripped) = ["lakhs", "lakh", "lacs", "lac"]
        .iter()
        .find_map(|u| lower.strip_suffix(u))
    {
        multiplier = 1e5;
        s = stripped.trim().to_string();
    }

    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * multiplier)
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_numeric(&s),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" => Some(true),
            "false" | "no" | "n" => Some(false),
            _ => None,
        },
        _ => None,
    })
}
