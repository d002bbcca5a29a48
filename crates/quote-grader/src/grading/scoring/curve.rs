pub const CURVE_KNEE: f64 = 70.0;
const CURVE_SPAN: f64 = 30.0;
const CURVE_EXPONENT: f64 = 1.8;

/// Compress composite scores above the knee so the high 80s and 90s are rare.
///
/// Scores at or below 70 pass through. Above it the curve is strictly
/// increasing and still maps 100 to 100.
pub fn compress(raw: f64) -> f64 {
    if raw <= CURVE_KNEE {
        return raw;
    }

    let position = ((raw - CURVE_KNEE) / CURVE_SPAN).min(1.0);
    CURVE_KNEE + CURVE_SPAN * position.powf(CURVE_EXPONENT)
}
