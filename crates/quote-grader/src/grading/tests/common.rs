use axum::response::Response;
use serde_json::Value;
use std::sync::Arc;

use crate::grading::router::grading_router;
use crate::grading::scoring::QuoteScoringEngine;
use crate::grading::service::QuoteGradingService;
use crate::grading::signals::ExtractionSignals;

/// A licensed, fully documented quote at $1,200 per opening.
pub(super) fn favorable_signals() -> ExtractionSignals {
    ExtractionSignals {
        is_valid_quote: true,
        validity_reason: Some("Itemized impact window proposal".to_string()),
        total_price_found: true,
        total_price_value: Some(12_000.0),
        opening_count_estimate: Some(10),
        has_compliance_keyword: true,
        has_compliance_identifier: true,
        has_laminated_mention: true,
        has_glass_build_detail: true,
        license_number_present: true,
        license_number_value: Some("CGC1527139".to_string()),
        contractor_name_extracted: Some("Gulfstream Impact Windows LLC".to_string()),
        noa_number_value: Some("NOA 21-0512.03".to_string()),
        has_permit_mention: true,
        has_demo_install_detail: true,
        has_specific_materials: true,
        has_wall_repair_mention: true,
        has_finish_detail: true,
        has_cleanup_mention: true,
        has_brand_clarity: true,
        has_detailed_scope: true,
        deposit_percentage: Some(5.0),
        has_safe_payment_terms: true,
        has_warranty: true,
        has_labor_warranty: true,
        warranty_years: Some(10.0),
        has_lifetime_warranty: true,
        has_transferable_warranty: true,
        ..ExtractionSignals::default()
    }
}

/// Everything the extraction step can flag against a quote, at once.
pub(super) fn hostile_signals() -> ExtractionSignals {
    ExtractionSignals {
        is_valid_quote: true,
        total_price_found: true,
        total_price_value: Some(31_000.0),
        opening_count_estimate: Some(8),
        has_tempered_only_risk: true,
        has_non_impact_language: true,
        has_owner_builder_language: true,
        has_subject_to_change: true,
        has_repairs_excluded: true,
        has_standard_installation: true,
        deposit_percentage: Some(65.0),
        has_final_payment_trap: true,
        has_payment_before_completion: true,
        has_contract_traps: true,
        contract_trap_list: vec![
            "Binding arbitration in another county".to_string(),
            "30% cancellation fee".to_string(),
        ],
        has_manager_discount: true,
        ..ExtractionSignals::default()
    }
}

pub(super) fn engine() -> QuoteScoringEngine {
    QuoteScoringEngine::new()
}

pub(super) fn service() -> QuoteGradingService {
    QuoteGradingService::new()
}

pub(super) fn signals_payload(signals: &ExtractionSignals) -> Value {
    serde_json::to_value(signals).expect("signals serialize")
}

pub(super) fn router() -> axum::Router {
    grading_router(Arc::new(service()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
