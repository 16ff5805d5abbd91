//! Scan report: decisions in watchlist order plus ranked by-view groups.

pub mod digest;
pub mod notify;

use std::cmp::Ordering;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};
use crate::models::decision::{View, ViewDecision};
use crate::models::quote::IndexSnapshot;

pub use digest::{render_digest, render_markdown, DIGEST_BEGIN, DIGEST_END};
pub use notify::{build_rationale, notification_items, NotificationItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexContext {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FetchError>,
}

impl IndexContext {
    pub fn from_outcome(name: &str, outcome: &std::result::Result<IndexSnapshot, FetchError>) -> Self {
        match outcome {
            Ok(snapshot) => Self {
                name: snapshot.name.clone(),
                change_pct: Some(snapshot.change_pct),
                error: None,
            },
            Err(e) => Self {
                name: name.to_string(),
                change_pct: None,
                error: Some(e.clone()),
            },
        }
    }
}

/// Ranked symbol names per view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewGroups {
    #[serde(rename = "BUY")]
    pub buy: Vec<String>,
    #[serde(rename = "WATCH")]
    pub watch: Vec<String>,
    #[serde(rename = "AVOID")]
    pub avoid: Vec<String>,
}

impl ViewGroups {
    pub fn get(&self, view: View) -> &[String] {
        match view {
            View::Buy => &self.buy,
            View::Watch => &self.watch,
            View::Avoid => &self.avoid,
        }
    }
}

/// One scan's output. Built once at the end of a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub index: IndexContext,
    /// Watchlist order.
    pub decisions: Vec<ViewDecision>,
    pub groups: ViewGroups,
}

/// A presentational slice of one view group.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGroup<'a> {
    pub view: View,
    pub entries: Vec<&'a ViewDecision>,
    /// Size of the group before `top_n` truncation.
    pub total: usize,
}

impl ScanReport {
    pub fn new(generated_at: DateTime<Utc>, index: IndexContext, decisions: Vec<ViewDecision>) -> Self {
        let mut report = Self {
            generated_at,
            index,
            decisions,
            groups: ViewGroups::default(),
        };
        report.groups = ViewGroups {
            buy: report.names(View::Buy),
            watch: report.names(View::Watch),
            avoid: report.names(View::Avoid),
        };
        report
    }

    fn names(&self, view: View) -> Vec<String> {
        self.group(view).into_iter().map(|d| d.symbol.clone()).collect()
    }

    /// All decisions with `view`, in display rank.
    pub fn group(&self, view: View) -> Vec<&ViewDecision> {
        let mut entries: Vec<&ViewDecision> =
            self.decisions.iter().filter(|d| d.view == view).collect();
        entries.sort_by(|a, b| rank_order(a, b));
        entries
    }

    /// Requested views in BUY, WATCH, AVOID order, each truncated to `top_n`.
    /// Empty groups are omitted.
    pub fn ranked(&self, views: &[View], top_n: Option<usize>) -> Vec<RankedGroup<'_>> {
        View::ALL
            .iter()
            .filter(|view| views.contains(view))
            .filter_map(|&view| {
                let mut entries = self.group(view);
                let total = entries.len();
                if total == 0 {
                    return None;
                }
                if let Some(n) = top_n {
                    entries.truncate(n);
                }
                Some(RankedGroup {
                    view,
                    entries,
                    total,
                })
            })
            .collect()
    }

    pub fn count(&self, view: View) -> usize {
        self.decisions.iter().filter(|d| d.view == view).count()
    }

    pub fn decision(&self, symbol: &str) -> Option<&ViewDecision> {
        self.decisions.iter().find(|d| d.symbol == symbol)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Score desc, then relative strength desc (unknown last), then symbol asc.
pub fn rank_order(a: &ViewDecision, b: &ViewDecision) -> Ordering {
    b.score_value()
        .cmp(&a.score_value())
        .then_with(|| match (a.relative_strength(), b.relative_strength()) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.symbol.cmp(&b.symbol))
}
