//! Linear interpolation of a quarter guess between two known references.

use figfall_types::{CodeReference, ItemCode, Quarter};
use tracing::debug;

/// Interpolate a quarter for `target` between two known references.
///
/// `lower.code <= target <= upper.code` is the expected case but not
/// enforced; out-of-range targets extrapolate rather than clamp. With equal
/// codes there is nothing to interpolate and `lower`'s quarter is returned
/// unchanged.
///
/// The proportion is `|1 - (upper.code - target) / diff|`, and the quarter
/// delta rounds half away from zero (`f64::round`).
#[must_use]
pub fn estimate(lower: &CodeReference, upper: &CodeReference, target: ItemCode) -> Quarter {
    let diff = i64::from(upper.code.get()) - i64::from(lower.code.get());
    if diff == 0 {
        return lower.quarter;
    }

    let remaining = i64::from(upper.code.get()) - i64::from(target.get());
    let scale = (1.0 - remaining as f64 / diff as f64).abs();
    let span = (upper.quarter.linearize() - lower.quarter.linearize()) as f64;
    let quarters_to_add = (span * scale).round() as i64;

    let guess = lower.quarter.add_quarters(quarters_to_add);
    debug!(
        lower = %lower.quarter,
        upper = %upper.quarter,
        %target,
        scale,
        quarters_to_add,
        %guess,
        "interpolated quarter"
    );
    guess
}

/// Initial guess from up to two reference points.
///
/// With a single reference there is no slope to interpolate along, so its
/// quarter is used directly. With none, no guess is possible.
#[must_use]
pub fn initial_guess(
    below: Option<&CodeReference>,
    above: Option<&CodeReference>,
    target: ItemCode,
) -> Option<Quarter> {
    match (below, above) {
        (Some(lower), Some(upper)) => Some(estimate(lower, upper, target)),
        (Some(single), None) | (None, Some(single)) => Some(single.quarter),
        (None, None) => None,
    }
}
