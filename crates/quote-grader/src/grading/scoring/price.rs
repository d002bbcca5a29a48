use super::super::signals::{ExtractionSignals, OpeningCountHint};
use super::categories::{CategoryScore, Tally};

pub const PRICE_ROUNDING_STEP: f64 = 50.0;
pub const UNPRICED_SCORE: u8 = 40;
pub const NOT_AVAILABLE: &str = "N/A";

const PREMIUM_FLOOR: u8 = 65;
const PREMIUM_CEILING: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq)]
enum BandLimit {
    Below(f64),
    AtMost(f64),
    Unbounded,
}

impl BandLimit {
    fn admits(self, per_opening: f64) -> bool {
        match self {
            BandLimit::Below(limit) => per_opening < limit,
            BandLimit::AtMost(limit) => per_opening <= limit,
            BandLimit::Unbounded => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PriceBand {
    limit: BandLimit,
    score: u8,
    premium_eligible: bool,
}

/// Market bands for price per opening, checked top to bottom. Scores peak in
/// the middle band, so the table is not monotonic in price.
const PRICE_BANDS: [PriceBand; 5] = [
    PriceBand {
        limit: BandLimit::Below(1000.0),
        score: 40,
        premium_eligible: false,
    },
    PriceBand {
        limit: BandLimit::Below(1200.0),
        score: 65,
        premium_eligible: false,
    },
    PriceBand {
        limit: BandLimit::AtMost(1800.0),
        score: 95,
        premium_eligible: false,
    },
    PriceBand {
        limit: BandLimit::AtMost(2500.0),
        score: 75,
        premium_eligible: false,
    },
    PriceBand {
        limit: BandLimit::Unbounded,
        score: 55,
        premium_eligible: true,
    },
];

/// Price per opening rounded to the nearest 50, or `None` when the total or
/// the opening count is unknown.
pub fn price_per_opening(
    signals: &ExtractionSignals,
    hint: Option<OpeningCountHint>,
) -> Option<f64> {
    let total = signals.total_price_value.filter(|total| *total > 0.0)?;
    let openings = signals
        .opening_count_estimate
        .filter(|count| *count > 0)
        .or_else(|| hint.map(OpeningCountHint::get))?;

    let quotient = total / f64::from(openings);
    Some((quotient / PRICE_ROUNDING_STEP).round() * PRICE_ROUNDING_STEP)
}

pub fn band_score(per_opening: f64, premium: bool) -> u8 {
    let band = PRICE_BANDS
        .iter()
        .find(|band| band.limit.admits(per_opening))
        .unwrap_or(&PRICE_BANDS[PRICE_BANDS.len() - 1]);

    if band.premium_eligible && premium {
        band.score.max(PREMIUM_FLOOR).min(PREMIUM_CEILING)
    } else {
        band.score
    }
}

pub(crate) fn score_price(per_opening: Option<f64>, signals: &ExtractionSignals) -> CategoryScore {
    match per_opening {
        Some(value) => CategoryScore {
            score: band_score(value, signals.has_premium_indicators),
            ..CategoryScore::default()
        },
        None => {
            let mut tally = Tally::starting_at(i32::from(UNPRICED_SCORE));
            tally.missing("Total price and opening count needed to check price per opening");
            tally.finish()
        }
    }
}

/// `$1,250` style display, or `N/A` when nothing could be computed.
pub fn format_price_per_opening(per_opening: Option<f64>) -> String {
    match per_opening {
        Some(value) => format!("${}", group_thousands(value.round() as u64)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(total: Option<f64>, openings: Option<u32>) -> ExtractionSignals {
        ExtractionSignals {
            is_valid_quote: true,
            total_price_found: total.is_some(),
            total_price_value: total,
            opening_count_estimate: openings,
            ..ExtractionSignals::default()
        }
    }

    #[test]
    fn rounds_quotient_to_nearest_fifty() {
        assert_eq!(
            price_per_opening(&priced(Some(12_000.0), Some(10)), None),
            Some(1200.0)
        );
        assert_eq!(
            price_per_opening(&priced(Some(12_300.0), Some(10)), None),
            Some(1250.0)
        );
        assert_eq!(
            price_per_opening(&priced(Some(12_240.0), Some(10)), None),
            Some(1200.0)
        );
    }

    #[test]
    fn hint_only_fills_a_missing_estimate() {
        let hint = OpeningCountHint::new(8);

        assert_eq!(
            price_per_opening(&priced(Some(12_000.0), None), hint),
            Some(1500.0)
        );
        assert_eq!(
            price_per_opening(&priced(Some(12_000.0), Some(10)), hint),
            Some(1200.0)
        );
        assert_eq!(price_per_opening(&priced(Some(12_000.0), None), None), None);
        assert_eq!(price_per_opening(&priced(None, Some(10)), hint), None);
    }

    #[test]
    fn zero_opening_estimate_falls_back_to_hint() {
        let hint = OpeningCountHint::new(4);
        assert_eq!(
            price_per_opening(&priced(Some(6_000.0), Some(0)), hint),
            Some(1500.0)
        );
    }

    #[test]
    fn band_table_is_non_monotonic() {
        assert_eq!(band_score(950.0, false), 40);
        assert_eq!(band_score(1000.0, false), 65);
        assert_eq!(band_score(1150.0, false), 65);
        assert_eq!(band_score(1200.0, false), 95);
        assert_eq!(band_score(1800.0, false), 95);
        assert_eq!(band_score(1850.0, false), 75);
        assert_eq!(band_score(2500.0, false), 75);
        assert_eq!(band_score(2550.0, false), 55);
    }

    #[test]
    fn premium_indicators_only_lift_the_top_band() {
        assert_eq!(band_score(3000.0, true), 65);
        assert_eq!(band_score(2000.0, true), 75);
        assert_eq!(band_score(900.0, true), 40);
    }

    #[test]
    fn unpriced_quote_defaults_with_missing_item() {
        let category = score_price(None, &priced(None, None));
        assert_eq!(category.score, UNPRICED_SCORE);
        assert_eq!(category.missing_items.len(), 1);
    }

    #[test]
    fn formats_with_thousands_separator() {
        assert_eq!(format_price_per_opening(Some(1200.0)), "$1,200");
        assert_eq!(format_price_per_opening(Some(950.0)), "$950");
        assert_eq!(format_price_per_opening(Some(1_250_000.0)), "$1,250,000");
        assert_eq!(format_price_per_opening(None), "N/A");
    }
}
