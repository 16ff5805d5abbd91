//! `{symbol, view, score, rationale}` tuples for a downstream notifier.

use serde::{Deserialize, Serialize};

use crate::models::decision::{View, ViewDecision};
use crate::models::score::MAX_SCORE;
use crate::report::ScanReport;
use crate::signals::scoring::OIR_BUY_RATIO;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub symbol: String,
    pub view: View,
    pub score: u8,
    pub rationale: String,
}

/// Ranked items for the requested views, at most `top_n` per view.
pub fn notification_items(report: &ScanReport, views: &[View], top_n: usize) -> Vec<NotificationItem> {
    report
        .ranked(views, Some(top_n))
        .into_iter()
        .flat_map(|group| group.entries)
        .map(|decision| NotificationItem {
            symbol: decision.symbol.clone(),
            view: decision.view,
            score: decision.score_value(),
            rationale: build_rationale(decision),
        })
        .collect()
}

/// `Score 5/7, ΔVWAP=+0.80%, RS=+1.10%, OIR=1.90`
pub fn build_rationale(decision: &ViewDecision) -> String {
    if let Some(err) = &decision.error {
        return format!("Error fetching {}: {}", decision.symbol, err);
    }

    let mut parts = vec![format!("Score {}/{}", decision.score_value(), MAX_SCORE)];
    if let Some(signals) = &decision.signals {
        if let Some(dev) = signals.vwap_deviation_pct {
            parts.push(format!("ΔVWAP={:+.2}%", dev));
        }
        if let Some(rs) = signals.relative_strength_pct {
            parts.push(format!("RS={:+.2}%", rs));
        }
        match signals.order_imbalance_ratio {
            Some(oir) if oir >= OIR_BUY_RATIO => parts.push(format!("OIR={:.2}", oir)),
            _ if signals.near_day_or_week_high == Some(true) => {
                parts.push("near_high/52W".to_string())
            }
            _ => {}
        }
    }
    parts.join(", ")
}
