//! Risk and session gates. Gates only ever lower the view ceiling.

use chrono::{DateTime, Utc};

use crate::models::decision::{CircuitBand, GateCeiling, GateReason, View};
use crate::models::quote::{is_placeholder, RawQuote};
use crate::models::signals::CanonicalSignals;
use crate::signals::session::is_session_open;

/// A band within this % of price counts as locked for gating.
pub const CIRCUIT_LOCK_PCT: f64 = 1.0;

const ACTIVE_STATUSES: [&str; 3] = ["active", "trading", "listed"];

pub fn evaluate_gates(
    quote: &RawQuote,
    signals: &CanonicalSignals,
    now: DateTime<Utc>,
) -> GateCeiling {
    let mut ceiling = GateCeiling::unrestricted();

    if !is_session_open(now) {
        ceiling.restrict(View::Watch, GateReason::SessionClosed);
    }

    if let Some(status) = present(quote.trading_status.as_deref()) {
        let normalized = status.to_ascii_lowercase();
        if !ACTIVE_STATUSES.contains(&normalized.as_str()) {
            ceiling.restrict(
                View::Watch,
                GateReason::TradingStatus {
                    status: status.to_string(),
                },
            );
        }
    }

    if let Some(prox) = signals.circuit_proximity_pct {
        if prox <= CIRCUIT_LOCK_PCT {
            ceiling.restrict(
                View::Watch,
                GateReason::CircuitLock {
                    band: CircuitBand::Upper,
                    proximity_pct: prox,
                },
            );
        }
    }
    if let Some(prox) = signals.lower_circuit_proximity_pct {
        if prox <= CIRCUIT_LOCK_PCT {
            ceiling.restrict(
                View::Watch,
                GateReason::CircuitLock {
                    band: CircuitBand::Lower,
                    proximity_pct: prox,
                },
            );
        }
    }

    if let Some(indicator) = present(quote.surveillance.as_deref()) {
        ceiling.restrict(
            View::Watch,
            GateReason::Surveillance {
                indicator: indicator.to_string(),
            },
        );
    }

    if quote.fno_ban == Some(true) {
        ceiling.restrict(View::Watch, GateReason::FnoBan);
    }

    ceiling
}

/// Treat exchange placeholder tokens as absent.
fn present(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    (!is_placeholder(value)).then_some(value)
}
