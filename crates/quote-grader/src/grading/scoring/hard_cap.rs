use serde::{Deserialize, Serialize};

use super::super::signals::ExtractionSignals;

pub const NO_CEILING: u8 = 100;

/// Ceiling imposed on the overall score by a consumer-protection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardCapResult {
    pub applied: bool,
    pub ceiling: u8,
    pub reason: Option<String>,
    pub statute: Option<String>,
}

impl HardCapResult {
    pub fn none() -> Self {
        Self {
            applied: false,
            ceiling: NO_CEILING,
            reason: None,
            statute: None,
        }
    }

    /// Apply the ceiling to an already curved score.
    pub fn limit(&self, score: u8) -> u8 {
        if self.applied {
            score.min(self.ceiling)
        } else {
            score
        }
    }
}

impl Default for HardCapResult {
    fn default() -> Self {
        Self::none()
    }
}

struct HardCapRule {
    applies: fn(&ExtractionSignals) -> bool,
    ceiling: u8,
    reason: &'static str,
    statute: &'static str,
    warning: &'static str,
}

fn missing_license(signals: &ExtractionSignals) -> bool {
    !signals.license_number_present
}

fn owner_builder(signals: &ExtractionSignals) -> bool {
    signals.has_owner_builder_language
}

fn majority_deposit(signals: &ExtractionSignals) -> bool {
    signals
        .deposit_percentage
        .is_some_and(|deposit| deposit > 50.0)
}

fn tempered_only(signals: &ExtractionSignals) -> bool {
    signals.has_tempered_only_risk && !signals.has_laminated_mention
}

fn paid_before_completion(signals: &ExtractionSignals) -> bool {
    signals.has_payment_before_completion
}

/// Evaluated in this order. A later rule only takes over the reported reason
/// when its ceiling is strictly lower, so equal ceilings keep the earlier rule.
const HARD_CAP_RULES: [HardCapRule; 5] = [
    HardCapRule {
        applies: missing_license,
        ceiling: 25,
        reason: "No contractor license number appears on the quote",
        statute: "F.S. 489.128",
        warning: "No contractor license number found; contracts with unlicensed contractors are unenforceable",
    },
    HardCapRule {
        applies: owner_builder,
        ceiling: 25,
        reason: "Owner-builder language shifts permit and code liability to the homeowner",
        statute: "F.S. 489.103(7)",
        warning: "Owner-builder language detected; the homeowner may be taking on contractor liability",
    },
    HardCapRule {
        applies: majority_deposit,
        ceiling: 55,
        reason: "Deposit exceeds half of the contract price",
        statute: "F.S. 489.126",
        warning: "Deposit above 50% of the contract price",
    },
    HardCapRule {
        applies: tempered_only,
        ceiling: 30,
        reason: "Glass is tempered only with no laminated impact glass specified",
        statute: "FBC 1609.1.2",
        warning: "Tempered-only glass does not provide windborne debris protection",
    },
    HardCapRule {
        applies: paid_before_completion,
        ceiling: 40,
        reason: "Payment is due before the work is completed",
        statute: "F.S. 501.204",
        warning: "Full payment is required before the work is completed",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardCapEvaluation {
    pub result: HardCapResult,
    pub warnings: Vec<String>,
}

pub fn evaluate_hard_caps(signals: &ExtractionSignals) -> HardCapEvaluation {
    let initial = HardCapEvaluation {
        result: HardCapResult::none(),
        warnings: Vec::new(),
    };

    HARD_CAP_RULES
        .iter()
        .filter(|rule| (rule.applies)(signals))
        .fold(initial, |mut evaluation, rule| {
            evaluation.warnings.push(rule.warning.to_string());
            if rule.ceiling < evaluation.result.ceiling {
                evaluation.result = HardCapResult {
                    applied: true,
                    ceiling: rule.ceiling,
                    reason: Some(rule.reason.to_string()),
                    statute: Some(rule.statute.to_string()),
                };
            }
            evaluation
        })
}
