//! Human-facing renderings: the delimited digest and a markdown summary.

use crate::models::decision::{View, ViewDecision};
use crate::models::score::MAX_SCORE;
use crate::report::notify::build_rationale;
use crate::report::ScanReport;
use crate::signals::session::format_ist;

pub const DIGEST_BEGIN: &str = "--- BEGIN AGENT MESSAGE ---";
pub const DIGEST_END: &str = "--- END AGENT MESSAGE ---";

/// Digest bracketed by [`DIGEST_BEGIN`]/[`DIGEST_END`] so it can be cut out of log output.
pub fn render_digest(report: &ScanReport, views: &[View], top_n: usize) -> String {
    let mut lines = vec![
        DIGEST_BEGIN.to_string(),
        header_line(report),
        "Heuristic intraday views (research screening, not trading advice).".to_string(),
    ];

    for group in report.ranked(views, Some(top_n)) {
        lines.push(String::new());
        lines.push(format!(
            "{} candidates (top {} of {}):",
            group.view,
            group.entries.len(),
            group.total
        ));
        lines.extend(group.entries.into_iter().map(digest_entry));
    }

    lines.push(DIGEST_END.to_string());
    lines.join("\n")
}

pub fn render_markdown(report: &ScanReport, views: &[View], top_n: Option<usize>) -> String {
    let mut lines = vec![
        format!("# Top-down Intraday Scan — {}", format_ist(report.generated_at)),
        String::new(),
        format!("Reference index: {}", index_text(report)),
        String::new(),
        "Ranked by score, then relative strength. Views include risk and session gates.".to_string(),
    ];

    for group in report.ranked(views, top_n) {
        lines.push(String::new());
        lines.push(format!("## {} ({})", group.view, group.total));
        for decision in group.entries {
            lines.push(markdown_entry(decision));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

fn header_line(report: &ScanReport) -> String {
    format!(
        "Top-down scan — {} | {}",
        format_ist(report.generated_at),
        index_text(report)
    )
}

fn index_text(report: &ScanReport) -> String {
    match (&report.index.change_pct, &report.index.error) {
        (Some(chg), _) => format!("{} {:+.2}%", report.index.name, chg),
        (None, Some(e)) => format!("{} n/a ({})", report.index.name, e.kind),
        (None, None) => format!("{} n/a", report.index.name),
    }
}

fn digest_entry(decision: &ViewDecision) -> String {
    if let Some(err) = &decision.error {
        return format!("- {}: no quote ({})", decision.symbol, err.kind);
    }

    let mut line = format!(
        "- {}: LTP={}, chg%={} | Score {}/{}",
        decision.symbol,
        price_text(decision),
        signed(decision.signals.as_ref().and_then(|s| s.change_pct), ""),
        decision.score_value(),
        MAX_SCORE
    );
    let drivers = driver_signals(decision);
    if !drivers.is_empty() {
        line.push_str(", ");
        line.push_str(&drivers.join(", "));
    }
    if let Some(reason) = decision.reason() {
        line.push_str(&format!(" [capped: {}]", reason));
    }
    line
}

fn markdown_entry(decision: &ViewDecision) -> String {
    if let Some(err) = &decision.error {
        return format!(
            "- **{} — {}** | no quote ({}): {}",
            decision.view, decision.symbol, err.kind, err.message
        );
    }

    let signals = decision.signals.clone().unwrap_or_default();
    let mut line = format!(
        "- **{} — {}** | Score {}/{} | LTP={}, ΔVWAP={}, chg%={}, RS={}, OIR={}, near_high/low={}/{}, circuit_prox={}",
        decision.view,
        decision.symbol,
        decision.score_value(),
        MAX_SCORE,
        price_text(decision),
        signed(signals.vwap_deviation_pct, "%"),
        signed(signals.change_pct, ""),
        signed(signals.relative_strength_pct, "%"),
        plain(signals.order_imbalance_ratio, ""),
        flag(signals.near_day_or_week_high),
        flag(signals.near_day_or_week_low),
        plain(signals.circuit_proximity_pct, "%"),
    );
    line.push_str(&format!("\n  {}", build_rationale(decision)));
    if let Some(reason) = decision.reason() {
        line.push_str(&format!(" (capped: {})", reason));
    }
    line
}

/// Signals behind the score, plus any criteria that could not be evaluated.
fn driver_signals(decision: &ViewDecision) -> Vec<String> {
    let Some(signals) = &decision.signals else {
        return Vec::new();
    };
    let mut parts = vec![
        format!("ΔVWAP={}", signed(signals.vwap_deviation_pct, "%")),
        format!("RS={}", signed(signals.relative_strength_pct, "%")),
    ];
    if let Some(oir) = signals.order_imbalance_ratio {
        parts.push(format!("OIR={:.2}", oir));
    }
    if signals.near_day_or_week_high == Some(true) {
        parts.push("near_high".to_string());
    }
    if let Some(prox) = signals.circuit_proximity_pct {
        parts.push(format!("circuit_prox={:.2}%", prox));
    }
    if let Some(score) = &decision.score {
        let skipped: Vec<&str> = score.skipped().map(|c| c.label()).collect();
        if !skipped.is_empty() {
            parts.push(format!("skipped={}", skipped.join("/")));
        }
    }
    parts
}

fn price_text(decision: &ViewDecision) -> String {
    match decision.signals.as_ref().and_then(|s| s.price) {
        Some(price) => format!("₹{:.2}", price),
        None => "n/a".to_string(),
    }
}

fn signed(value: Option<f64>, suffix: &str) -> String {
    value
        .map(|v| format!("{:+.2}{}", v, suffix))
        .unwrap_or_else(|| "n/a".to_string())
}

fn plain(value: Option<f64>, suffix: &str) -> String {
    value
        .map(|v| format!("{:.2}{}", v, suffix))
        .unwrap_or_else(|| "n/a".to_string())
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "n/a",
    }
}
