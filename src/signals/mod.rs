//! Signal derivation, scoring, gating and classification.
//!
//! Everything here is pure: no I/O, no shared state.

pub mod classifier;
pub mod gates;
pub mod narrative;
pub mod normalizer;
pub mod scoring;
pub mod session;

pub use classifier::{classify, classify_failure, classify_outcome, final_view};
pub use gates::evaluate_gates;
pub use narrative::{apply_override, AdjustedDecision, NarrativeAdjuster, NarrativeAdjustment, Notch};
pub use normalizer::normalize;
pub use scoring::score;
