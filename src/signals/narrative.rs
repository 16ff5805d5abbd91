//! Optional narrative override applied after classification.
//!
//! News-driven judgment lives outside the mechanical core. An adjuster looks
//! at a finished [`ViewDecision`] and may move it by one notch with a
//! rationale. The scanner never calls this on its own.

use serde::{Deserialize, Serialize};

use crate::models::decision::{View, ViewDecision};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notch {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeAdjustment {
    pub notch: Notch,
    pub rationale: String,
}

pub trait NarrativeAdjuster {
    /// `None` leaves the decision as classified.
    fn adjust(&self, decision: &ViewDecision) -> Option<NarrativeAdjustment>;
}

impl<F> NarrativeAdjuster for F
where
    F: Fn(&ViewDecision) -> Option<NarrativeAdjustment>,
{
    fn adjust(&self, decision: &ViewDecision) -> Option<NarrativeAdjustment> {
        self(decision)
    }
}

/// A decision together with any narrative adjustment. The original is untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedDecision<'a> {
    pub decision: &'a ViewDecision,
    pub view: View,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

pub fn apply_override<'a>(
    decision: &'a ViewDecision,
    adjuster: &dyn NarrativeAdjuster,
) -> AdjustedDecision<'a> {
    match adjuster.adjust(decision) {
        Some(adjustment) => AdjustedDecision {
            decision,
            view: match adjustment.notch {
                Notch::Up => decision.view.upgrade(),
                Notch::Down => decision.view.downgrade(),
            },
            rationale: Some(adjustment.rationale),
        },
        None => AdjustedDecision {
            decision,
            view: decision.view,
            rationale: None,
        },
    }
}
