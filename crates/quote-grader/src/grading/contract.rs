use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::signals::{ExtractionSignals, OpeningCountHint, MAX_OPENING_HINT, MIN_OPENING_HINT};

/// One offending field in an extraction payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub problem: String,
}

impl FieldViolation {
    fn new(field: &str, problem: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Validation errors raised before any scoring runs.
#[derive(Debug, thiserror::Error)]
pub enum SignalContractViolation {
    #[error("extraction payload must be a JSON object")]
    NotAnObject,
    #[error("extraction payload failed validation: {}", join_violations(.0))]
    InvalidFields(Vec<FieldViolation>),
    #[error("opening count hint must be between 1 and 200, found {0}")]
    OpeningHintOutOfRange(u32),
}

impl SignalContractViolation {
    pub fn violations(&self) -> Vec<FieldViolation> {
        match self {
            SignalContractViolation::NotAnObject => {
                vec![FieldViolation::new("$", "expected a JSON object")]
            }
            SignalContractViolation::InvalidFields(violations) => violations.clone(),
            SignalContractViolation::OpeningHintOutOfRange(found) => vec![FieldViolation::new(
                "openingCountHint",
                format!("must be between {MIN_OPENING_HINT} and {MAX_OPENING_HINT}, found {found}"),
            )],
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldKind {
    Flag,
    Text,
    Number { min: f64, max: f64 },
    Count,
    TextList,
}

impl FieldKind {
    const fn unbounded() -> Self {
        FieldKind::Number {
            min: 0.0,
            max: f64::MAX,
        }
    }
}

const REQUIRED_FIELD: &str = "isValidQuote";

const FIELDS: &[(&str, FieldKind)] = &[
    ("validityReason", FieldKind::Text),
    ("totalPriceFound", FieldKind::Flag),
    ("totalPriceValue", FieldKind::unbounded()),
    ("openingCountEstimate", FieldKind::Count),
    ("hasComplianceKeyword", FieldKind::Flag),
    ("hasComplianceIdentifier", FieldKind::Flag),
    ("hasLaminatedMention", FieldKind::Flag),
    ("hasGlassBuildDetail", FieldKind::Flag),
    ("hasTemperedOnlyRisk", FieldKind::Flag),
    ("hasNonImpactLanguage", FieldKind::Flag),
    ("licenseNumberPresent", FieldKind::Flag),
    ("licenseNumberValue", FieldKind::Text),
    ("hasOwnerBuilderLanguage", FieldKind::Flag),
    ("contractorNameExtracted", FieldKind::Text),
    ("noaNumberValue", FieldKind::Text),
    ("hasPermitMention", FieldKind::Flag),
    ("hasDemoInstallDetail", FieldKind::Flag),
    ("hasSpecificMaterials", FieldKind::Flag),
    ("hasWallRepairMention", FieldKind::Flag),
    ("hasFinishDetail", FieldKind::Flag),
    ("hasCleanupMention", FieldKind::Flag),
    ("hasBrandClarity", FieldKind::Flag),
    ("hasDetailedScope", FieldKind::Flag),
    ("hasSubjectToChange", FieldKind::Flag),
    ("hasRepairsExcluded", FieldKind::Flag),
    ("hasStandardInstallation", FieldKind::Flag),
    (
        "depositPercentage",
        FieldKind::Number {
            min: 0.0,
            max: 100.0,
        },
    ),
    ("hasFinalPaymentTrap", FieldKind::Flag),
    ("hasSafePaymentTerms", FieldKind::Flag),
    ("hasPaymentBeforeCompletion", FieldKind::Flag),
    ("hasContractTraps", FieldKind::Flag),
    ("contractTrapList", FieldKind::TextList),
    ("hasManagerDiscount", FieldKind::Flag),
    ("hasWarranty", FieldKind::Flag),
    ("hasLaborWarranty", FieldKind::Flag),
    ("warrantyYears", FieldKind::unbounded()),
    ("hasLifetimeWarranty", FieldKind::Flag),
    ("hasTransferableWarranty", FieldKind::Flag),
    ("hasPremiumIndicators", FieldKind::Flag),
];

/// Structural gate for extraction output. Every field is checked and all
/// violations are reported together so the upstream step can be corrected in
/// one pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalContract;

impl SignalContract {
    pub fn validate(&self, payload: &Value) -> Result<ExtractionSignals, SignalContractViolation> {
        let object = payload
            .as_object()
            .ok_or(SignalContractViolation::NotAnObject)?;

        let mut violations = Vec::new();

        match object.get(REQUIRED_FIELD) {
            Some(Value::Bool(_)) => {}
            None | Some(Value::Null) => {
                violations.push(FieldViolation::new(REQUIRED_FIELD, "required field is missing"))
            }
            Some(other) => violations.push(FieldViolation::new(
                REQUIRED_FIELD,
                format!("expected a boolean, found {}", describe(other)),
            )),
        }

        for (field, kind) in FIELDS {
            if let Some(value) = object.get(*field) {
                if let Some(problem) = check_field(value, *kind) {
                    violations.push(FieldViolation::new(field, problem));
                }
            }
        }

        log_unknown_fields(object);

        if !violations.is_empty() {
            return Err(SignalContractViolation::InvalidFields(violations));
        }

        // Null means "not stated"; drop it so flags and lists take their defaults.
        let present: Map<String, Value> = object
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        serde_json::from_value(Value::Object(present)).map_err(|err| {
            SignalContractViolation::InvalidFields(vec![FieldViolation::new("$", err.to_string())])
        })
    }

    pub fn opening_hint(&self, value: u32) -> Result<OpeningCountHint, SignalContractViolation> {
        OpeningCountHint::new(value).ok_or(SignalContractViolation::OpeningHintOutOfRange(value))
    }
}

fn check_field(value: &Value, kind: FieldKind) -> Option<String> {
    if value.is_null() {
        return None;
    }

    match kind {
        FieldKind::Flag => (!value.is_boolean())
            .then(|| format!("expected a boolean, found {}", describe(value))),
        FieldKind::Text => {
            (!value.is_string()).then(|| format!("expected a string, found {}", describe(value)))
        }
        FieldKind::Count => match value.as_u64() {
            Some(count) if count <= u32::MAX as u64 => None,
            Some(count) => Some(format!("count {count} is too large")),
            None => Some(format!(
                "expected a non-negative integer, found {}",
                describe(value)
            )),
        },
        FieldKind::Number { min, max } => match value.as_f64() {
            Some(number) if !number.is_finite() => Some("number must be finite".to_string()),
            Some(number) if number < min || number > max => {
                if max == f64::MAX {
                    Some(format!("must be at least {min}, found {number}"))
                } else {
                    Some(format!("must be between {min} and {max}, found {number}"))
                }
            }
            Some(_) => None,
            None => Some(format!("expected a number, found {}", describe(value))),
        },
        FieldKind::TextList => match value.as_array() {
            Some(items) => items
                .iter()
                .position(|item| !item.is_string())
                .map(|index| format!("item {index} is not a string")),
            None => Some(format!("expected a list of strings, found {}", describe(value))),
        },
    }
}

fn log_unknown_fields(object: &Map<String, Value>) {
    for key in object.keys() {
        let known = key.as_str() == REQUIRED_FIELD
            || FIELDS.iter().any(|(field, _)| *field == key.as_str());
        if !known {
            debug!(field = %key, "ignoring unrecognized extraction field");
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
