//! Edge-map enhancement operations
//!
//! The building blocks of the post-processing chain: min-max
//! normalization, percentile contrast stretching, gamma remapping and
//! linear scaling. Every function returns a new field.

use crate::{FilterError, FilterResult};
use edgemap_core::ScalarField;

/// Map a field onto [0, 1] by `(x - min) / (max - min)`.
///
/// The minimum is subtracted first. If the shifted field has a zero
/// maximum (constant input) the division is skipped and the all-zero
/// shifted field is returned.
///
/// # Examples
///
/// ```
/// use edgemap_core::ScalarField;
/// use edgemap_filter::enhance::normalize_min_max;
///
/// let field = ScalarField::from_rows(&[[2.0, 4.0, 6.0]]).unwrap();
/// assert_eq!(normalize_min_max(&field).data(), &[0.0, 0.5, 1.0]);
/// ```
pub fn normalize_min_max(field: &ScalarField) -> ScalarField {
    let min = field.min_value();
    let shifted = field.map(|v| v - min);
    let max = shifted.max_value();
    if max == 0.0 {
        return shifted;
    }
    shifted.map(|v| v / max)
}

/// Value at percentile `p` (0..=100) with linear interpolation between
/// closest ranks.
///
/// The rank is `p / 100 * (n - 1)` over the sorted samples.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `p` is outside [0, 100].
pub fn percentile(field: &ScalarField, p: f64) -> FilterResult<f64> {
    if !(0.0..=100.0).contains(&p) {
        return Err(FilterError::InvalidParameters(format!(
            "percentile must be in [0, 100], got {}",
            p
        )));
    }

    let mut sorted = field.data().to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(percentile_of_sorted(&sorted, p))
}

fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = (sorted.len() - 1) as f64 * (p / 100.0);
    let below = rank.floor();
    let t = rank - below;
    let lo = below as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    lerp(sorted[lo], sorted[hi], t)
}

/// Interpolate from the nearer end so that `t = 1` returns `b` exactly.
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Percentile contrast stretch.
///
/// Maps the `low` percentile to 0 and the `high` percentile to 1, clipping
/// everything outside. If both percentiles coincide the field is returned
/// unchanged.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if either percentile is
/// outside [0, 100] or `low > high`.
pub fn contrast_stretch(field: &ScalarField, low: f64, high: f64) -> FilterResult<ScalarField> {
    if low > high {
        return Err(FilterError::InvalidParameters(format!(
            "stretch low percentile {} exceeds high percentile {}",
            low, high
        )));
    }
    for p in [low, high] {
        if !(0.0..=100.0).contains(&p) {
            return Err(FilterError::InvalidParameters(format!(
                "percentile must be in [0, 100], got {}",
                p
            )));
        }
    }
    let mut sorted = field.data().to_vec();
    sorted.sort_by(f64::total_cmp);
    let lo = percentile_of_sorted(&sorted, low);
    let hi = percentile_of_sorted(&sorted, high);

    let range = hi - lo;
    if range == 0.0 {
        return Ok(field.clone());
    }
    Ok(field.map(|v| ((v - lo) / range).clamp(0.0, 1.0)))
}

/// Power-law remapping `x^gamma`.
///
/// For values in [0, 1], `gamma < 1` brightens midtones and `gamma > 1`
/// darkens them. Ordering of samples is preserved.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `gamma` is finite
/// and > 0.
pub fn gamma_correct(field: &ScalarField, gamma: f64) -> FilterResult<ScalarField> {
    if !(gamma.is_finite() && gamma > 0.0) {
        return Err(FilterError::InvalidParameters(format!(
            "gamma must be finite and > 0, got {}",
            gamma
        )));
    }
    Ok(field.map(|v| v.powf(gamma)))
}

/// Uniform linear scale `x * factor`. No clipping is applied.
pub fn scale_linear(field: &ScalarField, factor: f64) -> ScalarField {
    field.map(|v| v * factor)
}
