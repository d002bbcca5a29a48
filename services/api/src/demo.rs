use crate::infra::load_signals;
use chrono::Utc;
use clap::{Args, ValueEnum};
use quote_grader::error::AppError;
use quote_grader::grading::{GradeResponse, QuoteGrade, QuoteGradingService};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Extraction signals as JSON (bare object or `{ "signals": ... }`)
    #[arg(long)]
    pub(crate) signals: PathBuf,
    /// Opening count to use when the quote does not state one (1-200)
    #[arg(long)]
    pub(crate) openings: Option<u32>,
    /// Print the full grade as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Grade only this sample quote
    #[arg(long, value_enum)]
    pub(crate) quote: Option<SampleQuote>,
    /// Print each grade as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SampleQuote {
    Strong,
    Unlicensed,
    TemperedOnly,
    NotAQuote,
}

impl SampleQuote {
    const ALL: [SampleQuote; 4] = [
        SampleQuote::Strong,
        SampleQuote::Unlicensed,
        SampleQuote::TemperedOnly,
        SampleQuote::NotAQuote,
    ];

    fn label(self) -> &'static str {
        match self {
            SampleQuote::Strong => "Licensed installer, itemized proposal",
            SampleQuote::Unlicensed => "Same proposal without a license number",
            SampleQuote::TemperedOnly => "Tempered glass with no laminated spec",
            SampleQuote::NotAQuote => "Roofing invoice uploaded by mistake",
        }
    }

    fn opening_hint(self) -> Option<u32> {
        match self {
            SampleQuote::Unlicensed => Some(10),
            _ => None,
        }
    }

    fn payload(self) -> Value {
        let mut payload = json!({
            "isValidQuote": true,
            "validityReason": "Itemized impact window proposal",
            "totalPriceFound": true,
            "totalPriceValue": 12_000,
            "openingCountEstimate": 10,
            "hasComplianceKeyword": true,
            "hasComplianceIdentifier": true,
            "hasLaminatedMention": true,
            "hasGlassBuildDetail": true,
            "licenseNumberPresent": true,
            "licenseNumberValue": "CGC1527139",
            "contractorNameExtracted": "Gulfstream Impact Windows LLC",
            "noaNumberValue": "NOA 21-0512.03",
            "hasPermitMention": true,
            "hasDemoInstallDetail": true,
            "hasSpecificMaterials": true,
            "hasWallRepairMention": true,
            "hasFinishDetail": true,
            "hasCleanupMention": true,
            "hasBrandClarity": true,
            "hasDetailedScope": true,
            "depositPercentage": 10,
            "hasSafePaymentTerms": true,
            "hasWarranty": true,
            "hasLaborWarranty": true,
            "warrantyYears": 10,
            "hasTransferableWarranty": true,
        });

        match self {
            SampleQuote::Strong => {}
            SampleQuote::Unlicensed => {
                payload["licenseNumberPresent"] = json!(false);
                payload["licenseNumberValue"] = Value::Null;
                payload["openingCountEstimate"] = Value::Null;
            }
            SampleQuote::TemperedOnly => {
                payload["hasLaminatedMention"] = json!(false);
                payload["hasGlassBuildDetail"] = json!(false);
                payload["hasTemperedOnlyRisk"] = json!(true);
            }
            SampleQuote::NotAQuote => {
                payload = json!({
                    "isValidQuote": false,
                    "validityReason": "Roofing invoice, not a window or door quote",
                });
            }
        }

        payload
    }
}

pub(crate) fn run_grade(args: GradeArgs) -> Result<(), AppError> {
    let GradeArgs {
        signals,
        openings,
        json,
    } = args;

    let payload = load_signals(&signals)?;
    let grade = QuoteGradingService::new().grade(&payload, openings)?;
    print_grade(grade, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = QuoteGradingService::new();
    let samples = match args.quote {
        Some(sample) => vec![sample],
        None => SampleQuote::ALL.to_vec(),
    };

    println!("Quote grading demo");
    for sample in samples {
        println!("\n== {} ==", sample.label());
        match service.grade(&sample.payload(), sample.opening_hint()) {
            Ok(grade) => print_grade(grade, args.json)?,
            Err(err) => println!("  Rejected: {err}"),
        }
    }

    Ok(())
}

fn print_grade(grade: QuoteGrade, as_json: bool) -> Result<(), AppError> {
    if as_json {
        let response = GradeResponse {
            graded_at: Utc::now(),
            grade,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", render_report(&grade));
    }
    Ok(())
}

fn render_report(grade: &QuoteGrade) -> String {
    let QuoteGrade {
        scored,
        forensic,
        identity,
    } = grade;

    let mut lines = vec![
        format!(
            "Overall: {}/100 ({} risk)",
            scored.overall_score,
            forensic.risk_level.label()
        ),
        forensic.headline.clone(),
        format!(
            "Categories: safety {} | scope {} | fine print {} | warranty {} | price {}",
            scored.safety_score,
            scored.scope_score,
            scored.fine_print_score,
            scored.warranty_score,
            scored.price_score
        ),
        format!("Price per opening: {}", scored.price_per_opening),
        format!("Summary: {}", scored.summary),
    ];

    if let Some(name) = &identity.contractor_name {
        let license = identity.license_number.as_deref().unwrap_or("no license listed");
        lines.push(format!("Contractor: {name} ({license})"));
    }
    if !identity.noa_numbers.is_empty() {
        lines.push(format!("Approvals: {}", identity.noa_numbers.join(", ")));
    }

    push_section(&mut lines, "Warnings", scored.warnings.iter().cloned());
    push_section(&mut lines, "Missing", scored.missing_items.iter().cloned());
    push_section(
        &mut lines,
        "Statutes",
        forensic
            .statute_citations
            .iter()
            .map(|citation| format!("{}: {}", citation.statute, citation.reason)),
    );
    push_section(
        &mut lines,
        "Questions to ask",
        forensic.questions_to_ask.iter().cloned(),
    );
    push_section(
        &mut lines,
        "Positive findings",
        forensic.positive_findings.iter().cloned(),
    );

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, items: impl Iterator<Item = String>) {
    let items: Vec<String> = items.map(|item| format!("  - {item}")).collect();
    if items.is_empty() {
        return;
    }
    lines.push(format!("{title}:"));
    lines.extend(items);
}
