//! Quote grading: boundary validation, category scoring, hard caps, and the
//! forensic explanation of an impact window or door quote.
//!
//! Every call is a pure function of the extraction signals and an optional
//! opening-count hint. Identical input always yields an identical grade.

pub mod contract;
pub mod forensic;
pub mod identity;
pub mod router;
pub mod scoring;
pub mod service;
pub mod signals;

#[cfg(test)]
mod tests;

pub use contract::{FieldViolation, SignalContract, SignalContractViolation};
pub use forensic::{generate_forensic_summary, ForensicSummary, RiskLevel, StatuteCitation};
pub use identity::ExtractedIdentity;
pub use router::{grading_router, GradeRequest, GradeResponse};
pub use scoring::{
    aggregate_overall, CategoryScores, HardCapResult, QuoteScoringEngine, ScoredResult,
};
pub use service::{GradingError, QuoteGrade, QuoteGradingService};
pub use signals::{ExtractionSignals, OpeningCountHint};
