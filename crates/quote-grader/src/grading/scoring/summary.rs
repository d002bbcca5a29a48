use super::hard_cap::HardCapResult;
use super::CategoryScores;

pub(crate) const NOT_GRADED_SUMMARY: &str =
    "No grading was performed because the document is not a recognized window or door quote.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Safety,
    FinePrint,
    Scope,
    Warranty,
    Price,
}

impl Category {
    /// Order in which a weak category claims the summary.
    const fn ordered() -> [Category; 5] {
        [
            Category::Safety,
            Category::FinePrint,
            Category::Scope,
            Category::Warranty,
            Category::Price,
        ]
    }

    const fn threshold(self) -> u8 {
        match self {
            Category::Price => 60,
            _ => 50,
        }
    }

    fn score(self, scores: &CategoryScores) -> u8 {
        match self {
            Category::Safety => scores.safety,
            Category::FinePrint => scores.fine_print,
            Category::Scope => scores.scope,
            Category::Warranty => scores.warranty,
            Category::Price => scores.price,
        }
    }

    const fn commentary(self) -> &'static str {
        match self {
            Category::Safety => {
                "Safety and code compliance is the weakest area: the quote does not clearly document impact-rated products."
            }
            Category::FinePrint => {
                "Payment terms and fine print are the weakest area: review the deposit and payment conditions before signing."
            }
            Category::Scope => {
                "Scope of work is the weakest area: key installation steps are not spelled out."
            }
            Category::Warranty => {
                "Warranty coverage is the weakest area: labor and product terms are unclear."
            }
            Category::Price => {
                "Price is the weakest area: the cost per opening falls outside the typical market range."
            }
        }
    }
}

pub(crate) fn summarize(scores: &CategoryScores, overall: u8, cap: &HardCapResult) -> String {
    if cap.applied {
        let reason = cap.reason.as_deref().unwrap_or("a consumer-protection rule was triggered");
        return match cap.statute.as_deref() {
            Some(statute) => format!(
                "Score limited to at most {}: {reason} ({statute}).",
                cap.ceiling
            ),
            None => format!("Score limited to at most {}: {reason}.", cap.ceiling),
        };
    }

    let lowest = Category::ordered()
        .into_iter()
        .map(|category| category.score(scores))
        .min()
        .unwrap_or(0);

    let weakest = Category::ordered().into_iter().find(|category| {
        let score = category.score(scores);
        score == lowest && score < category.threshold()
    });

    if let Some(category) = weakest {
        return category.commentary().to_string();
    }

    let band = if overall >= 80 {
        "This quote is comprehensive and well documented across safety, scope, and terms."
    } else if overall >= 60 {
        "This quote is acceptable but has gaps worth clarifying before signing."
    } else {
        "This quote raises significant concerns; get clarification or a second quote before committing."
    };
    band.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(safety: u8, scope: u8, fine_print: u8, warranty: u8, price: u8) -> CategoryScores {
        CategoryScores {
            safety,
            scope,
            fine_print,
            warranty,
            price,
        }
    }

    #[test]
    fn cap_reason_takes_precedence() {
        let cap = HardCapResult {
            applied: true,
            ceiling: 25,
            reason: Some("No license".to_string()),
            statute: Some("F.S. 489.128".to_string()),
        };

        let summary = summarize(&scores(10, 90, 90, 90, 95), 25, &cap);

        assert_eq!(summary, "Score limited to at most 25: No license (F.S. 489.128).");
    }

    #[test]
    fn weakest_category_below_threshold_is_named() {
        let summary = summarize(&scores(85, 90, 30, 70, 95), 72, &HardCapResult::none());
        assert!(summary.starts_with("Payment terms"));
    }

    #[test]
    fn tie_for_lowest_resolves_in_fixed_order() {
        let summary = summarize(&scores(90, 40, 40, 40, 95), 58, &HardCapResult::none());
        assert!(summary.starts_with("Payment terms"));
    }

    #[test]
    fn price_uses_its_own_threshold() {
        let summary = summarize(&scores(90, 90, 80, 70, 55), 76, &HardCapResult::none());
        assert!(summary.starts_with("Price is the weakest"));
    }

    #[test]
    fn minimum_above_threshold_falls_back_to_band() {
        let strong = summarize(&scores(85, 90, 80, 70, 95), 80, &HardCapResult::none());
        let middling = summarize(&scores(60, 70, 60, 55, 65), 62, &HardCapResult::none());

        assert!(strong.contains("comprehensive"));
        assert!(middling.contains("acceptable"));
    }

    #[test]
    fn lowest_category_above_its_threshold_does_not_yield_to_a_higher_weak_one() {
        // warranty (52) is lowest but passes; price (58) is weak but not lowest.
        let summary = summarize(&scores(70, 70, 70, 52, 58), 55, &HardCapResult::none());
        assert!(summary.contains("significant concerns"));
    }
}
