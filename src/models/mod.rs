//! Shared data models spanning the scan pipeline.

pub mod decision;
pub mod quote;
pub mod score;
pub mod signals;
pub mod watchlist;

pub use decision::{CircuitBand, GateCeiling, GateReason, View, ViewDecision};
pub use quote::{IndexSnapshot, RawQuote};
pub use score::{Criterion, CriterionOutcome, CriterionResult, ScoreResult, MAX_SCORE};
pub use signals::{CanonicalSignals, Liquidity};
pub use watchlist::{Watchlist, WatchlistSpec, DEFAULT_INDEX};
