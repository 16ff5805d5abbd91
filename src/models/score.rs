use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed denominator of the intraday score.
pub const MAX_SCORE: u8 = 7;

/// The seven binary scoring criteria, in rubric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    VwapBias,
    RelativeStrength,
    Momentum,
    OrderImbalance,
    NearHigh,
    Liquidity,
    CircuitRisk,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::VwapBias,
        Criterion::RelativeStrength,
        Criterion::Momentum,
        Criterion::OrderImbalance,
        Criterion::NearHigh,
        Criterion::Liquidity,
        Criterion::CircuitRisk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Criterion::VwapBias => "ΔVWAP",
            Criterion::RelativeStrength => "RS",
            Criterion::Momentum => "momentum",
            Criterion::OrderImbalance => "OIR",
            Criterion::NearHigh => "near_high/52W",
            Criterion::Liquidity => "liquidity",
            Criterion::CircuitRisk => "circuit/margin",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionOutcome {
    Awarded,
    NotMet,
    /// Input unavailable. Contributes 0 and is not a failure.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub outcome: CriterionOutcome,
}

/// Bounded score plus the per-criterion record that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub criteria: Vec<CriterionResult>,
}

impl ScoreResult {
    pub fn from_outcomes(criteria: Vec<CriterionResult>) -> Self {
        let awarded = criteria
            .iter()
            .filter(|c| c.outcome == CriterionOutcome::Awarded)
            .count();
        Self {
            score: (awarded as u8).min(MAX_SCORE),
            criteria,
        }
    }

    pub fn outcome(&self, criterion: Criterion) -> Option<CriterionOutcome> {
        self.criteria
            .iter()
            .find(|c| c.criterion == criterion)
            .map(|c| c.outcome)
    }

    pub fn awarded(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.with_outcome(CriterionOutcome::Awarded)
    }

    pub fn skipped(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.with_outcome(CriterionOutcome::Skipped)
    }

    fn with_outcome(&self, outcome: CriterionOutcome) -> impl Iterator<Item = Criterion> + '_ {
        self.criteria
            .iter()
            .filter(move |c| c.outcome == outcome)
            .map(|c| c.criterion)
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.score, MAX_SCORE)
    }
}
