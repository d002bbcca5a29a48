use serde::{Deserialize, Serialize};

use super::super::signals::ExtractionSignals;

/// Output of one category scorer. Each scorer owns its findings; the
/// aggregator merges them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u8,
    pub warnings: Vec<String>,
    pub missing_items: Vec<String>,
}

/// Running point total for a scorer, clamped once at the end.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    points: i32,
    warnings: Vec<String>,
    missing_items: Vec<String>,
}

impl Tally {
    pub(crate) fn starting_at(points: i32) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub(crate) fn add_if(&mut self, condition: bool, points: i32) {
        if condition {
            self.points += points;
        }
    }

    pub(crate) fn deduct(&mut self, points: i32) {
        self.points -= points;
    }

    pub(crate) fn cap_at(&mut self, ceiling: i32) {
        self.points = self.points.min(ceiling);
    }

    pub(crate) fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub(crate) fn missing(&mut self, item: impl Into<String>) {
        self.missing_items.push(item.into());
    }

    pub(crate) fn finish(self) -> CategoryScore {
        CategoryScore {
            score: self.points.clamp(0, 100) as u8,
            warnings: self.warnings,
            missing_items: self.missing_items,
        }
    }
}

pub(crate) fn score_safety(signals: &ExtractionSignals) -> CategoryScore {
    let mut tally = Tally::starting_at(0);
    tally.add_if(signals.has_compliance_keyword, 25);
    tally.add_if(signals.has_compliance_identifier, 25);
    tally.add_if(signals.has_laminated_mention, 25);
    tally.add_if(signals.has_glass_build_detail, 10);

    if signals.has_tempered_only_risk {
        tally.cap_at(30);
    }

    if signals.has_non_impact_language {
        tally.cap_at(25);
        tally.warn("Quote contains non-impact language; openings may not meet hurricane code");
    }

    let impact_evidence = signals.has_compliance_keyword
        || signals.has_compliance_identifier
        || signals.has_laminated_mention;
    if !impact_evidence {
        tally.cap_at(40);
        tally.missing("Impact rating, product approval number, or laminated glass specification");
    }

    tally.finish()
}

pub(crate) fn score_scope(signals: &ExtractionSignals) -> CategoryScore {
    let mut tally = Tally::starting_at(0);
    tally.add_if(signals.has_permit_mention, 20);
    tally.add_if(signals.has_demo_install_detail, 15);
    tally.add_if(signals.has_specific_materials, 10);
    tally.add_if(signals.has_wall_repair_mention, 15);
    tally.add_if(signals.has_finish_detail, 10);
    tally.add_if(signals.has_cleanup_mention, 15);
    tally.add_if(signals.has_brand_clarity, 15);

    if signals.has_subject_to_change {
        tally.points = (tally.points - 30).max(0);
        tally.warn("Price or scope is marked \"subject to change\"");
    }

    if signals.has_standard_installation {
        tally.deduct(10);
        tally.warn("Relies on generic \"standard installation\" language instead of a defined scope");
    }

    if signals.has_repairs_excluded {
        tally.missing("Stucco and drywall repair after removal (explicitly excluded)");
    } else if !signals.has_wall_repair_mention {
        tally.missing("Stucco and drywall repair after removal");
    }

    tally.finish()
}

pub(crate) fn score_fine_print(signals: &ExtractionSignals) -> CategoryScore {
    let mut tally = Tally::starting_at(60);
    let mut deposit_disqualifies = false;

    match signals.deposit_percentage {
        Some(deposit) if deposit > 40.0 => {
            deposit_disqualifies = true;
            tally.warn(format!(
                "Deposit of {deposit}% exceeds the 40% threshold for a safe payment schedule"
            ));
        }
        Some(deposit) if deposit >= 10.0 => tally.points = tally.points.max(80),
        Some(_) => tally.points = tally.points.max(100),
        None => tally.missing("Deposit amount and payment schedule"),
    }

    if signals.has_final_payment_trap {
        tally.cap_at(25);
        tally.warn("Final payment is due before inspection or homeowner sign-off");
    } else {
        tally.add_if(signals.has_safe_payment_terms, 10);
    }

    if signals.has_contract_traps {
        let traps = &signals.contract_trap_list;
        let deduction = (traps.len() as i32 * 10).min(30);
        tally.deduct(deduction);
        if traps.is_empty() {
            tally.warn("Contract contains one-sided or restrictive clauses");
        } else {
            let named = traps.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
            tally.warn(format!("Contract traps found: {named}"));
        }
    }

    if signals.has_manager_discount {
        tally.deduct(15);
        tally.warn("High-pressure \"manager discount\" or expiring-price tactic detected");
    }

    if deposit_disqualifies {
        tally.points = 0;
    }

    tally.finish()
}

pub(crate) fn score_warranty(signals: &ExtractionSignals) -> CategoryScore {
    let mut tally = Tally::starting_at(0);
    tally.add_if(signals.has_warranty, 30);
    tally.add_if(signals.has_labor_warranty, 40);
    tally.add_if(signals.warranty_years.is_some_and(|years| years > 1.0), 15);
    tally.add_if(signals.has_lifetime_warranty, 15);
    tally.add_if(signals.has_transferable_warranty, 10);

    if !signals.has_warranty {
        tally.missing("Written product and labor warranty terms");
    }

    tally.finish()
}
