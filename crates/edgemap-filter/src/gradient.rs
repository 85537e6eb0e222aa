//! Gradient magnitude
//!
//! Merges horizontal and vertical kernel responses into a single
//! edge-strength field: `sqrt(gx² + gy²)`.

use crate::convolve::convolve;
use crate::{FilterError, FilterResult, Kernel};
use edgemap_core::ScalarField;

/// Euclidean combination of two directional responses.
///
/// The result is never negative and unbounded above.
///
/// # Errors
///
/// Returns [`FilterError::ShapeMismatch`] if `gx` and `gy` differ in
/// dimensions.
pub fn combine(gx: &ScalarField, gy: &ScalarField) -> FilterResult<ScalarField> {
    if gx.dimensions() != gy.dimensions() {
        return Err(FilterError::ShapeMismatch {
            expected: gx.dimensions(),
            actual: gy.dimensions(),
        });
    }
    Ok(gx.zip_map(gy, f64::hypot)?)
}

/// Convolve with both kernels of a pair and combine the responses.
pub fn gradient_magnitude(
    field: &ScalarField,
    kernel_x: &Kernel,
    kernel_y: &Kernel,
) -> FilterResult<ScalarField> {
    let gx = convolve(field, kernel_x)?;
    let gy = convolve(field, kernel_y)?;
    combine(&gx, &gy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_pythagorean() {
        let gx = ScalarField::from_rows(&[[3.0, -5.0], [0.0, 1.0]]).unwrap();
        let gy = ScalarField::from_rows(&[[4.0, 12.0], [0.0, -1.0]]).unwrap();
        let mag = combine(&gx, &gy).unwrap();
        assert_eq!(mag.get_pixel(0, 0).unwrap(), 5.0);
        assert_eq!(mag.get_pixel(1, 0).unwrap(), 13.0);
        assert_eq!(mag.get_pixel(0, 1).unwrap(), 0.0);
        assert!((mag.get_pixel(1, 1).unwrap() - std::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn test_combine_shape_mismatch() {
        let gx = ScalarField::new(3, 3).unwrap();
        let gy = ScalarField::new(3, 2).unwrap();
        match combine(&gx, &gy) {
            Err(FilterError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, (3, 3));
                assert_eq!(actual, (3, 2));
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_gradient_magnitude_vertical_step() {
        // Left half 0, right half 1: Sobel responds only along the step
        let field = ScalarField::from_rows(&[
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ])
        .unwrap();
        let mag = gradient_magnitude(&field, &Kernel::sobel_x(), &Kernel::sobel_y()).unwrap();
        for y in 0..3 {
            assert_eq!(mag.get_pixel(0, y).unwrap(), 0.0);
            assert_eq!(mag.get_pixel(1, y).unwrap(), 4.0);
            assert_eq!(mag.get_pixel(2, y).unwrap(), 4.0);
            assert_eq!(mag.get_pixel(3, y).unwrap(), 0.0);
        }
    }
}
