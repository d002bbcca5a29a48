use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::contract::{SignalContract, SignalContractViolation};
use super::forensic::{generate_forensic_summary, ForensicSummary};
use super::identity::ExtractedIdentity;
use super::scoring::{QuoteScoringEngine, ScoredResult};
use super::signals::{ExtractionSignals, OpeningCountHint};

/// Everything a downstream consumer receives for one quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteGrade {
    pub scored: ScoredResult,
    pub forensic: ForensicSummary,
    pub identity: ExtractedIdentity,
}

/// Facade composing the signal contract, scoring engine, and forensic review.
#[derive(Debug, Clone, Default)]
pub struct QuoteGradingService {
    contract: SignalContract,
    engine: QuoteScoringEngine,
}

impl QuoteGradingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw extraction payload, then grade it.
    pub fn grade(
        &self,
        payload: &Value,
        opening_count_hint: Option<u32>,
    ) -> Result<QuoteGrade, GradingError> {
        let signals = self.contract.validate(payload).map_err(|err| {
            warn!(error = %err, "rejected extraction payload");
            err
        })?;
        let hint = opening_count_hint
            .map(|value| self.contract.opening_hint(value))
            .transpose()?;

        Ok(self.grade_signals(&signals, hint))
    }

    /// Grade signals that already passed the contract.
    pub fn grade_signals(
        &self,
        signals: &ExtractionSignals,
        hint: Option<OpeningCountHint>,
    ) -> QuoteGrade {
        let scored = self.engine.score(signals, hint);
        let forensic = generate_forensic_summary(signals, &scored);
        let identity = ExtractedIdentity::from_signals(signals);

        info!(
            overall = scored.overall_score,
            risk = forensic.risk_level.label(),
            hard_cap = scored.hard_cap.applied,
            ceiling = scored.hard_cap.ceiling,
            "quote graded"
        );

        QuoteGrade {
            scored,
            forensic,
            identity,
        }
    }
}

/// Error raised by the grading service.
#[derive(Debug, thiserror::Error)]
pub enum GradingError {
    #[error(transparent)]
    Contract(#[from] SignalContractViolation),
}
