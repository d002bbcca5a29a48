use serde::{Deserialize, Serialize};

/// Observations read from one uploaded quote by the upstream extraction step.
///
/// Only `is_valid_quote` is required, on every deserialization path. Flags
/// default to `false` and lists to empty; numeric and text fields stay `None`
/// when the document did not state them, which scoring treats differently
/// from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSignals {
    pub is_valid_quote: bool,
    #[serde(default)]
    pub validity_reason: Option<String>,

    #[serde(default)]
    pub total_price_found: bool,
    #[serde(default)]
    pub total_price_value: Option<f64>,
    #[serde(default)]
    pub opening_count_estimate: Option<u32>,

    #[serde(default)]
    pub has_compliance_keyword: bool,
    #[serde(default)]
    pub has_compliance_identifier: bool,
    #[serde(default)]
    pub has_laminated_mention: bool,
    #[serde(default)]
    pub has_glass_build_detail: bool,
    #[serde(default)]
    pub has_tempered_only_risk: bool,
    #[serde(default)]
    pub has_non_impact_language: bool,

    #[serde(default)]
    pub license_number_present: bool,
    #[serde(default)]
    pub license_number_value: Option<String>,
    #[serde(default)]
    pub has_owner_builder_language: bool,
    #[serde(default)]
    pub contractor_name_extracted: Option<String>,
    #[serde(default)]
    pub noa_number_value: Option<String>,

    #[serde(default)]
    pub has_permit_mention: bool,
    #[serde(default)]
    pub has_demo_install_detail: bool,
    #[serde(default)]
    pub has_specific_materials: bool,
    #[serde(default)]
    pub has_wall_repair_mention: bool,
    #[serde(default)]
    pub has_finish_detail: bool,
    #[serde(default)]
    pub has_cleanup_mention: bool,
    #[serde(default)]
    pub has_brand_clarity: bool,
    #[serde(default)]
    pub has_detailed_scope: bool,
    #[serde(default)]
    pub has_subject_to_change: bool,
    #[serde(default)]
    pub has_repairs_excluded: bool,
    #[serde(default)]
    pub has_standard_installation: bool,

    #[serde(default)]
    pub deposit_percentage: Option<f64>,
    #[serde(default)]
    pub has_final_payment_trap: bool,
    #[serde(default)]
    pub has_safe_payment_terms: bool,
    #[serde(default)]
    pub has_payment_before_completion: bool,
    #[serde(default)]
    pub has_contract_traps: bool,
    #[serde(default)]
    pub contract_trap_list: Vec<String>,
    #[serde(default)]
    pub has_manager_discount: bool,

    #[serde(default)]
    pub has_warranty: bool,
    #[serde(default)]
    pub has_labor_warranty: bool,
    #[serde(default)]
    pub warranty_years: Option<f64>,
    #[serde(default)]
    pub has_lifetime_warranty: bool,
    #[serde(default)]
    pub has_transferable_warranty: bool,
    #[serde(default)]
    pub has_premium_indicators: bool,
}

impl ExtractionSignals {
    /// Approval documentation counts when either an identifier was spotted or a
    /// concrete NOA number was read.
    pub fn has_approval_documentation(&self) -> bool {
        self.has_compliance_identifier || non_blank(&self.noa_number_value).is_some()
    }

    pub fn glass_specs_clear(&self) -> bool {
        self.has_laminated_mention || self.has_glass_build_detail
    }

    pub fn wall_repair_covered(&self) -> bool {
        self.has_wall_repair_mention && !self.has_repairs_excluded
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
}

pub const MIN_OPENING_HINT: u32 = 1;
pub const MAX_OPENING_HINT: u32 = 200;

/// Caller-supplied opening count used when the document did not state one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpeningCountHint(u32);

impl OpeningCountHint {
    pub fn new(value: u32) -> Option<Self> {
        (MIN_OPENING_HINT..=MAX_OPENING_HINT)
            .contains(&value)
            .then_some(Self(value))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}
