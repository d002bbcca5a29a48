use super::common::{engine, favorable_signals, hostile_signals};
use crate::grading::forensic::{generate_forensic_summary, ForensicSummary, RiskLevel};
use crate::grading::signals::ExtractionSignals;

fn review(signals: &ExtractionSignals) -> ForensicSummary {
    let scored = engine().score(signals, None);
    generate_forensic_summary(signals, &scored)
}

fn statutes(summary: &ForensicSummary) -> Vec<&str> {
    summary
        .statute_citations
        .iter()
        .map(|citation| citation.statute.as_str())
        .collect()
}

#[test]
fn risk_levels_follow_score_thresholds() {
    let expectations = [
        (0, RiskLevel::Critical),
        (30, RiskLevel::Critical),
        (31, RiskLevel::High),
        (50, RiskLevel::High),
        (51, RiskLevel::Moderate),
        (70, RiskLevel::Moderate),
        (71, RiskLevel::Acceptable),
        (100, RiskLevel::Acceptable),
    ];

    for (score, expected) in expectations {
        assert_eq!(RiskLevel::from_score(score), expected, "score {score}");
    }
}

#[test]
fn favorable_quote_lists_strengths_and_no_citations() {
    let summary = review(&favorable_signals());

    assert_eq!(summary.risk_level, RiskLevel::Acceptable);
    assert!(summary.statute_citations.is_empty());
    assert!(summary.questions_to_ask.is_empty());
    assert_eq!(
        summary.positive_findings,
        vec![
            "Contractor license number is listed",
            "Product approval (NOA) numbers are documented",
            "Scope of work is described in detail",
            "Labor warranty is included",
            "Glass type and build are specified",
        ]
    );
    assert!(!summary.hard_cap_applied);
}

#[test]
fn cap_statute_leads_and_is_not_repeated() {
    let signals = ExtractionSignals {
        license_number_present: false,
        ..favorable_signals()
    };

    let summary = review(&signals);

    assert_eq!(summary.risk_level, RiskLevel::Critical);
    assert_eq!(statutes(&summary), vec!["F.S. 489.128"]);
    assert_eq!(summary.questions_to_ask.len(), 1);
    assert!(summary.questions_to_ask[0].contains("license number"));
    assert!(summary.positive_findings.is_empty());
    assert_eq!(
        summary.headline,
        "Hard cap applied: No contractor license number appears on the quote (F.S. 489.128). Score limited to 25."
    );
    assert_eq!(summary.hard_cap_statute.as_deref(), Some("F.S. 489.128"));
}

#[test]
fn deposit_question_quotes_the_percentage() {
    let signals = ExtractionSignals {
        deposit_percentage: Some(60.0),
        ..favorable_signals()
    };

    let summary = review(&signals);

    assert_eq!(summary.risk_level, RiskLevel::Moderate);
    assert_eq!(statutes(&summary), vec!["F.S. 489.126"]);
    assert_eq!(
        summary.questions_to_ask,
        vec!["Why is a 60% deposit required, and when will you apply for the permit?"]
    );
    assert!(summary.positive_findings.is_empty());
}

#[test]
fn fractional_deposit_question_keeps_the_decimal() {
    let signals = ExtractionSignals {
        deposit_percentage: Some(40.4),
        ..favorable_signals()
    };

    let summary = review(&signals);

    assert_eq!(statutes(&summary), vec!["F.S. 489.126"]);
    assert_eq!(
        summary.questions_to_ask,
        vec!["Why is a 40.4% deposit required, and when will you apply for the permit?"]
    );
}

#[test]
fn uncapped_large_deposit_is_still_cited() {
    let signals = ExtractionSignals {
        deposit_percentage: Some(45.0),
        ..favorable_signals()
    };

    let summary = review(&signals);

    assert!(!summary.hard_cap_applied);
    assert_eq!(summary.risk_level, RiskLevel::Acceptable);
    assert_eq!(statutes(&summary), vec!["F.S. 489.126"]);
    assert_eq!(
        summary.positive_findings,
        vec![
            "Contractor license number is listed",
            "Product approval (NOA) numbers are documented",
            "Labor warranty is included",
        ]
    );
}

#[test]
fn citations_and_questions_are_bounded() {
    let summary = review(&hostile_signals());

    assert_eq!(summary.risk_level, RiskLevel::Critical);
    assert_eq!(
        statutes(&summary),
        vec![
            "F.S. 489.128",
            "F.S. 489.103(7)",
            "F.S. 489.126",
            "F.S. 501.204",
        ]
    );
    assert_eq!(summary.questions_to_ask.len(), 5);
    assert!(summary.questions_to_ask[2].starts_with("Why is a 65% deposit"));
    assert!(summary.questions_to_ask[4].starts_with("Is every opening laminated"));
}

#[test]
fn missing_approval_documents_are_cited_when_room_remains() {
    let signals = ExtractionSignals {
        has_compliance_identifier: false,
        noa_number_value: Some("   ".to_string()),
        ..favorable_signals()
    };

    let summary = review(&signals);

    assert_eq!(statutes(&summary), vec!["Fla. Admin. Code 61G20-3"]);
    assert!(summary.questions_to_ask[0].contains("NOA numbers"));
}

#[test]
fn tempered_glass_prompts_a_glass_question() {
    let signals = ExtractionSignals {
        has_laminated_mention: false,
        has_tempered_only_risk: true,
        ..favorable_signals()
    };

    let summary = review(&signals);

    assert_eq!(statutes(&summary), vec!["FBC 1609.1.2"]);
    assert_eq!(summary.questions_to_ask.len(), 1);
    assert!(summary.questions_to_ask[0].starts_with("Is every opening laminated"));
}

#[test]
fn invalid_document_is_explained_not_reviewed() {
    let signals = ExtractionSignals {
        is_valid_quote: false,
        validity_reason: Some("Receipt for lawn service".to_string()),
        ..hostile_signals()
    };

    let summary = review(&signals);

    assert_eq!(summary.headline, "Not graded: Receipt for lawn service");
    assert_eq!(summary.risk_level, RiskLevel::Critical);
    assert!(summary.statute_citations.is_empty());
    assert!(summary.questions_to_ask.is_empty());
    assert!(summary.positive_findings.is_empty());
    assert!(!summary.hard_cap_applied);
}
