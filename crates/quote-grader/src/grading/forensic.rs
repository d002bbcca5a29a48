use serde::{Deserialize, Serialize};

use super::scoring::ScoredResult;
use super::signals::ExtractionSignals;

pub const MAX_CITATIONS: usize = 4;
pub const MAX_ADDITIONAL_CITATIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 5;
pub const MAX_POSITIVE_FINDINGS: usize = 5;

const FINDINGS_THRESHOLD: u8 = 60;
const RICH_FINDINGS_THRESHOLD: u8 = 75;

/// Risk tier derived from the final overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Critical,
    High,
    Moderate,
    Acceptable,
}

impl RiskLevel {
    pub fn from_score(overall: u8) -> Self {
        match overall {
            0..=30 => RiskLevel::Critical,
            31..=50 => RiskLevel::High,
            51..=70 => RiskLevel::Moderate,
            _ => RiskLevel::Acceptable,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Critical => "critical",
            RiskLevel::High => "high",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Acceptable => "acceptable",
        }
    }

    const fn headline(self) -> &'static str {
        match self {
            RiskLevel::Critical => {
                "Critical risk: this quote has serious gaps that could cost you money or code compliance."
            }
            RiskLevel::High => "High risk: several important protections are missing from this quote.",
            RiskLevel::Moderate => {
                "Moderate risk: the quote is workable but needs clarification before signing."
            }
            RiskLevel::Acceptable => {
                "Acceptable: this quote covers the essentials with only minor gaps."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteCitation {
    pub statute: String,
    pub reason: String,
}

/// Human-readable explanation of a completed score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForensicSummary {
    pub headline: String,
    pub risk_level: RiskLevel,
    pub statute_citations: Vec<StatuteCitation>,
    pub questions_to_ask: Vec<String>,
    pub positive_findings: Vec<String>,
    pub hard_cap_applied: bool,
    pub hard_cap_reason: Option<String>,
    pub hard_cap_statute: Option<String>,
}

struct CitationCheck {
    statute: &'static str,
    reason: &'static str,
    question: String,
}

fn citation_checks(signals: &ExtractionSignals) -> Vec<CitationCheck> {
    let mut checks = Vec::new();

    if !signals.license_number_present {
        checks.push(CitationCheck {
            statute: "F.S. 489.128",
            reason: "Contracts with unlicensed contractors are unenforceable by the contractor",
            question: "What is your Florida contractor license number so I can verify it with the DBPR?"
                .to_string(),
        });
    }

    if signals.has_owner_builder_language {
        checks.push(CitationCheck {
            statute: "F.S. 489.103(7)",
            reason: "An owner-builder permit makes the homeowner responsible for code compliance",
            question: "Will the permit be pulled under your license rather than as an owner-builder permit?"
                .to_string(),
        });
    }

    if let Some(deposit) = signals.deposit_percentage.filter(|deposit| *deposit > 40.0) {
        checks.push(CitationCheck {
            statute: "F.S. 489.126",
            reason: "Large deposits require the contractor to apply for permits and start work on a set timeline",
            question: format!(
                "Why is a {deposit}% deposit required, and when will you apply for the permit?"
            ),
        });
    }

    if signals.has_payment_before_completion {
        checks.push(CitationCheck {
            statute: "F.S. 501.204",
            reason: "Demanding full payment before the work is finished can be an unfair trade practice",
            question: "Can final payment be held until the final inspection passes?".to_string(),
        });
    }

    if !signals.has_approval_documentation() {
        checks.push(CitationCheck {
            statute: "Fla. Admin. Code 61G20-3",
            reason: "Impact windows and doors need a Florida Product Approval or Miami-Dade NOA",
            question: "What are the Florida Product Approval or Miami-Dade NOA numbers for each product?"
                .to_string(),
        });
    }

    checks
}

fn gap_questions(signals: &ExtractionSignals) -> Vec<String> {
    let gaps = [
        (
            !signals.glass_specs_clear() || signals.has_tempered_only_risk,
            "Is every opening laminated impact glass, and what is the glass build (interlayer and thickness)?",
        ),
        (
            !signals.has_permit_mention,
            "Who is responsible for pulling permits and scheduling inspections?",
        ),
        (
            !signals.wall_repair_covered(),
            "Is stucco and drywall repair around each opening included in the price?",
        ),
        (
            !signals.has_labor_warranty,
            "How many years does your labor and installation warranty last?",
        ),
        (
            signals.has_subject_to_change,
            "What could cause the \"subject to change\" price to go up, and will changes be in writing?",
        ),
    ];

    gaps.into_iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, question)| question.to_string())
        .collect()
}

fn positive_findings(signals: &ExtractionSignals, overall: u8) -> Vec<String> {
    if overall < FINDINGS_THRESHOLD {
        return Vec::new();
    }

    let candidates: Vec<(bool, &str)> = if overall >= RICH_FINDINGS_THRESHOLD {
        vec![
            (signals.license_number_present, "Contractor license number is listed"),
            (
                signals.has_approval_documentation(),
                "Product approval (NOA) numbers are documented",
            ),
            (signals.has_detailed_scope, "Scope of work is described in detail"),
            (signals.has_labor_warranty, "Labor warranty is included"),
            (signals.glass_specs_clear(), "Glass type and build are specified"),
            (signals.has_permit_mention, "Permits are addressed in the quote"),
            (
                signals.has_safe_payment_terms,
                "Payment terms are tied to completion milestones",
            ),
            (signals.has_brand_clarity, "Window and door brand is clearly identified"),
        ]
    } else {
        vec![
            (signals.license_number_present, "Contractor license number is listed"),
            (
                signals.has_approval_documentation(),
                "Product approval (NOA) numbers are documented",
            ),
            (signals.has_labor_warranty, "Labor warranty is included"),
        ]
    };

    candidates
        .into_iter()
        .filter(|(present, _)| *present)
        .take(MAX_POSITIVE_FINDINGS)
        .map(|(_, finding)| finding.to_string())
        .collect()
}

/// Explain a completed score. Reads the scored result as-is and never
/// recomputes any category.
pub fn generate_forensic_summary(
    signals: &ExtractionSignals,
    scored: &ScoredResult,
) -> ForensicSummary {
    let cap = &scored.hard_cap;
    let risk_level = RiskLevel::from_score(scored.overall_score);

    if !signals.is_valid_quote {
        let reason = signals
            .validity_reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .unwrap_or("the document is not a recognized window or door quote");
        return ForensicSummary {
            headline: format!("Not graded: {reason}"),
            risk_level,
            statute_citations: Vec::new(),
            questions_to_ask: Vec::new(),
            positive_findings: Vec::new(),
            hard_cap_applied: false,
            hard_cap_reason: None,
            hard_cap_statute: None,
        };
    }

    let headline = match (cap.applied, cap.reason.as_deref()) {
        (true, Some(reason)) => {
            let statute = cap
                .statute
                .as_deref()
                .map(|statute| format!(" ({statute})"))
                .unwrap_or_default();
            format!(
                "Hard cap applied: {reason}{statute}. Score limited to {}.",
                cap.ceiling
            )
        }
        _ => risk_level.headline().to_string(),
    };

    let mut statute_citations = Vec::new();
    if let (true, Some(statute)) = (cap.applied, cap.statute.as_ref()) {
        statute_citations.push(StatuteCitation {
            statute: statute.clone(),
            reason: cap.reason.clone().unwrap_or_default(),
        });
    }

    let mut questions_to_ask = Vec::new();
    let mut additional = 0;
    for check in citation_checks(signals) {
        let already_cited = statute_citations
            .iter()
            .any(|citation| citation.statute == check.statute);
        if already_cited {
            questions_to_ask.push(check.question);
        } else if additional < MAX_ADDITIONAL_CITATIONS {
            statute_citations.push(StatuteCitation {
                statute: check.statute.to_string(),
                reason: check.reason.to_string(),
            });
            questions_to_ask.push(check.question);
            additional += 1;
        }
    }
    statute_citations.truncate(MAX_CITATIONS);

    questions_to_ask.extend(gap_questions(signals));
    questions_to_ask.truncate(MAX_QUESTIONS);

    ForensicSummary {
        headline,
        risk_level,
        statute_citations,
        questions_to_ask,
        positive_findings: positive_findings(signals, scored.overall_score),
        hard_cap_applied: cap.applied,
        hard_cap_reason: cap.reason.clone(),
        hard_cap_statute: cap.statute.clone(),
    }
}
