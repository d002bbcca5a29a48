mod categories;
mod curve;
mod hard_cap;
mod price;
mod summary;

pub use categories::CategoryScore;
pub use curve::{compress, CURVE_KNEE};
pub use hard_cap::{evaluate_hard_caps, HardCapEvaluation, HardCapResult, NO_CEILING};
pub use price::{band_score, format_price_per_opening, price_per_opening, NOT_AVAILABLE};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::signals::{ExtractionSignals, OpeningCountHint};

pub const MAX_WARNINGS: usize = 6;
pub const MAX_MISSING_ITEMS: usize = 6;

pub(crate) const NOT_A_QUOTE_WARNING: &str =
    "Uploaded document is not a recognized window or door quote";

/// Category weights in percent; they sum to 100.
const SAFETY_WEIGHT: u32 = 30;
const SCOPE_WEIGHT: u32 = 25;
const PRICE_WEIGHT: u32 = 20;
const FINE_PRINT_WEIGHT: u32 = 15;
const WARRANTY_WEIGHT: u32 = 10;

/// The five category scores feeding the weighted composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryScores {
    pub safety: u8,
    pub scope: u8,
    pub fine_print: u8,
    pub warranty: u8,
    pub price: u8,
}

impl CategoryScores {
    /// Weighted composite before curving, rounded half up.
    pub fn weighted(&self) -> u8 {
        let total = SAFETY_WEIGHT * u32::from(self.safety)
            + SCOPE_WEIGHT * u32::from(self.scope)
            + PRICE_WEIGHT * u32::from(self.price)
            + FINE_PRINT_WEIGHT * u32::from(self.fine_print)
            + WARRANTY_WEIGHT * u32::from(self.warranty);
        ((total + 50) / 100).min(100) as u8
    }
}

/// Weighted composite, curved, then limited by the hard-cap ceiling.
pub fn aggregate_overall(scores: &CategoryScores, cap: &HardCapResult) -> u8 {
    let raw = scores.weighted();
    let curved = compress(f64::from(raw)).round().clamp(0.0, 100.0) as u8;
    cap.limit(curved)
}

/// Graded assessment of one quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredResult {
    pub safety_score: u8,
    pub scope_score: u8,
    pub fine_print_score: u8,
    pub warranty_score: u8,
    pub price_score: u8,
    pub overall_score: u8,
    pub price_per_opening: String,
    pub warnings: Vec<String>,
    pub missing_items: Vec<String>,
    pub summary: String,
    pub hard_cap: HardCapResult,
}

impl ScoredResult {
    /// Terminal result for documents that are not quotes.
    pub fn not_graded() -> Self {
        Self {
            safety_score: 0,
            scope_score: 0,
            fine_print_score: 0,
            warranty_score: 0,
            price_score: 0,
            overall_score: 0,
            price_per_opening: NOT_AVAILABLE.to_string(),
            warnings: vec![NOT_A_QUOTE_WARNING.to_string()],
            missing_items: Vec::new(),
            summary: summary::NOT_GRADED_SUMMARY.to_string(),
            hard_cap: HardCapResult::none(),
        }
    }

    pub fn category_scores(&self) -> CategoryScores {
        CategoryScores {
            safety: self.safety_score,
            scope: self.scope_score,
            fine_print: self.fine_print_score,
            warranty: self.warranty_score,
            price: self.price_score,
        }
    }
}

/// Stateless scorer; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteScoringEngine;

impl QuoteScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(
        &self,
        signals: &ExtractionSignals,
        hint: Option<OpeningCountHint>,
    ) -> ScoredResult {
        if !signals.is_valid_quote {
            debug!(
                reason = signals.validity_reason.as_deref().unwrap_or("unspecified"),
                "document failed validity gate"
            );
            return ScoredResult::not_graded();
        }

        let per_opening = price_per_opening(signals, hint);

        let safety = categories::score_safety(signals);
        let scope = categories::score_scope(signals);
        let fine_print = categories::score_fine_print(signals);
        let warranty = categories::score_warranty(signals);
        let price = price::score_price(per_opening, signals);
        let caps = evaluate_hard_caps(signals);

        let scores = CategoryScores {
            safety: safety.score,
            scope: scope.score,
            fine_print: fine_print.score,
            warranty: warranty.score,
            price: price.score,
        };
        let overall = aggregate_overall(&scores, &caps.result);

        debug!(
            raw = scores.weighted(),
            overall,
            capped = caps.result.applied,
            "aggregated category scores"
        );

        let sections = [&safety, &scope, &fine_print, &warranty, &price];
        // Statute-level cap warnings lead so truncation never drops them.
        let warnings = caps
            .warnings
            .iter()
            .chain(sections.iter().flat_map(|section| section.warnings.iter()))
            .take(MAX_WARNINGS)
            .cloned()
            .collect();
        let missing_items = sections
            .iter()
            .flat_map(|section| section.missing_items.iter())
            .take(MAX_MISSING_ITEMS)
            .cloned()
            .collect();

        ScoredResult {
            safety_score: scores.safety,
            scope_score: scores.scope,
            fine_print_score: scores.fine_print,
            warranty_score: scores.warranty,
            price_score: scores.price,
            overall_score: overall,
            price_per_opening: format_price_per_opening(per_opening),
            warnings,
            missing_items,
            summary: summary::summarize(&scores, overall, &caps.result),
            hard_cap: caps.result,
        }
    }
}
