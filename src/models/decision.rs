//! Views, gate ceilings and the per-symbol decision record.

use crate::error::{FetchError, ScanError};
use crate::models::score::ScoreResult;
use crate::models::signals::CanonicalSignals;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Final classification. Declaration order gives AVOID < WATCH < BUY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum View {
    Avoid,
    Watch,
    Buy,
}

impl View {
    /// Display order used by reports.
    pub const ALL: [View; 3] = [View::Buy, View::Watch, View::Avoid];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Avoid => "AVOID",
            View::Watch => "WATCH",
            View::Buy => "BUY",
        }
    }

    /// Score-only view before any gate is applied.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => View::Avoid,
            2..=5 => View::Watch,
            _ => View::Buy,
        }
    }

    pub fn upgrade(self) -> Self {
        match self {
            View::Avoid => View::Watch,
            View::Watch | View::Buy => View::Buy,
        }
    }

    pub fn downgrade(self) -> Self {
        match self {
            View::Buy => View::Watch,
            View::Watch | View::Avoid => View::Avoid,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(View::Buy),
            "WATCH" => Ok(View::Watch),
            "AVOID" => Ok(View::Avoid),
            other => Err(ScanError::config(format!("unknown view '{}'", other))),
        }
    }
}

/// Why a gate restricted the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum GateReason {
    SessionClosed,
    TradingStatus { status: String },
    CircuitLock { band: CircuitBand, proximity_pct: f64 },
    Surveillance { indicator: String },
    FnoBan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitBand {
    Upper,
    Lower,
}

impl fmt::Display for GateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateReason::SessionClosed => f.write_str("market session closed"),
            GateReason::TradingStatus { status } => write!(f, "trading status '{}'", status),
            GateReason::CircuitLock {
                band: CircuitBand::Upper,
                proximity_pct,
            } => write!(f, "at upper circuit ({:.2}% away)", proximity_pct),
            GateReason::CircuitLock {
                band: CircuitBand::Lower,
                proximity_pct,
            } => write!(f, "at lower circuit ({:.2}% away)", proximity_pct),
            GateReason::Surveillance { indicator } => write!(f, "surveillance: {}", indicator),
            GateReason::FnoBan => f.write_str("F&O ban"),
        }
    }
}

/// Highest view the gates permit, with every gate that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCeiling {
    pub ceiling: View,
    pub reasons: Vec<GateReason>,
}

impl GateCeiling {
    pub fn unrestricted() -> Self {
        Self {
            ceiling: View::Buy,
            reasons: Vec::new(),
        }
    }

    /// Lower the ceiling to `cap` if that is more restrictive; always keep the reason.
    pub fn restrict(&mut self, cap: View, reason: GateReason) {
        self.ceiling = self.ceiling.min(cap);
        self.reasons.push(reason);
    }

    pub fn is_restricted(&self) -> bool {
        !self.reasons.is_empty()
    }
}

impl Default for GateCeiling {
    fn default() -> Self {
        Self::unrestricted()
    }
}

/// Outcome for one symbol in one scan. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewDecision {
    pub symbol: String,
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mechanical_view: Option<View>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signals: Option<CanonicalSignals>,
    /// Every gate that fired, whether or not it lowered the view.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gate_reasons: Vec<GateReason>,
    /// True when the ceiling pulled the view below the mechanical view.
    #[serde(default)]
    pub capped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,
}

impl ViewDecision {
    pub fn score_value(&self) -> u8 {
        self.score.as_ref().map(|s| s.score).unwrap_or(0)
    }

    pub fn relative_strength(&self) -> Option<f64> {
        self.signals.as_ref().and_then(|s| s.relative_strength_pct)
    }

    /// Short reason string: the fetch error kind, or the binding gate reasons.
    pub fn reason(&self) -> Option<String> {
        if let Some(err) = &self.error {
            return Some(err.kind.label().to_string());
        }
        if self.capped {
            let reasons: Vec<String> = self.gate_reasons.iter().map(|r| r.to_string()).collect();
            return Some(reasons.join("; "));
        }
        None
    }
}
