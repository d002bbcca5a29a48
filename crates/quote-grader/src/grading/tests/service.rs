use serde_json::json;

use super::common::{favorable_signals, service, signals_payload};
use crate::grading::contract::SignalContractViolation;
use crate::grading::identity::ExtractedIdentity;
use crate::grading::service::GradingError;
use crate::grading::signals::ExtractionSignals;

#[test]
fn payload_and_typed_signals_grade_identically() {
    let signals = favorable_signals();
    let service = service();

    let from_payload = service
        .grade(&signals_payload(&signals), None)
        .expect("payload grades");
    let from_signals = service.grade_signals(&signals, None);

    assert_eq!(from_payload, from_signals);
}

#[test]
fn repeated_grading_serializes_identically() {
    let payload = signals_payload(&favorable_signals());
    let service = service();

    let first = serde_json::to_vec(&service.grade(&payload, Some(12)).expect("grades"))
        .expect("serializes");
    let second = serde_json::to_vec(&service.grade(&payload, Some(12)).expect("grades"))
        .expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn rejects_hint_out_of_range() {
    let error = service()
        .grade(&json!({ "isValidQuote": true }), Some(201))
        .expect_err("hint is validated");

    assert!(matches!(
        error,
        GradingError::Contract(SignalContractViolation::OpeningHintOutOfRange(201))
    ));
}

#[test]
fn contract_runs_before_hint_validation() {
    let error = service()
        .grade(&json!({ "hasPermitMention": true }), Some(0))
        .expect_err("payload is validated");

    assert!(matches!(
        error,
        GradingError::Contract(SignalContractViolation::InvalidFields(_))
    ));
}

#[test]
fn identity_projects_trimmed_display_fields() {
    let identity = ExtractedIdentity::from_signals(&favorable_signals());

    assert_eq!(
        identity.contractor_name.as_deref(),
        Some("Gulfstream Impact Windows LLC")
    );
    assert_eq!(identity.license_number.as_deref(), Some("CGC1527139"));
    assert_eq!(identity.noa_numbers, vec!["NOA 21-0512.03"]);
}

#[test]
fn blank_identity_fields_are_dropped() {
    let signals = ExtractionSignals {
        contractor_name_extracted: Some("  ".to_string()),
        license_number_value: None,
        noa_number_value: Some(String::new()),
        ..favorable_signals()
    };

    assert_eq!(
        ExtractedIdentity::from_signals(&signals),
        ExtractedIdentity::default()
    );
}

#[test]
fn identity_never_changes_the_score() {
    let service = service();
    let anonymous = ExtractionSignals {
        contractor_name_extracted: None,
        license_number_value: None,
        ..favorable_signals()
    };

    let named = service.grade_signals(&favorable_signals(), None);
    let unnamed = service.grade_signals(&anonymous, None);

    assert_eq!(named.scored, unnamed.scored);
    assert_ne!(named.identity, unnamed.identity);
}

#[test]
fn grade_serializes_in_camel_case() {
    let grade = service().grade_signals(&favorable_signals(), None);
    let value = serde_json::to_value(&grade).expect("serializes");

    assert_eq!(value["scored"]["finePrintScore"], 100);
    assert_eq!(value["scored"]["hardCap"]["ceiling"], 100);
    assert_eq!(value["forensic"]["hardCapApplied"], false);
    assert_eq!(value["identity"]["noaNumbers"][0], "NOA 21-0512.03");
}
