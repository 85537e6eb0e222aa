//! Convolution operations
//!
//! Applies a [`Kernel`] to a [`ScalarField`] with reflective border
//! handling. The kernel is not flipped (correlation), which is the usual
//! convention for gradient masks:
//!
//! `out[y][x] = Σ k[ky][kx] · f[y + ky − cy][x + kx − cx]`
//!
//! Samples outside the field mirror the interior with the edge sample
//! repeated (`d c b a | a b c d | d c b a`), so index −1 reads index 0 and
//! index `n` reads index `n − 1`.

use crate::{FilterError, FilterResult, Kernel};
use edgemap_core::ScalarField;

/// Map an out-of-range index back into `0..len` by half-sample reflection.
///
/// The pattern repeats every `2 * len` samples, so any offset is valid.
///
/// # Examples
///
/// ```
/// use edgemap_filter::convolve::reflect_index;
///
/// assert_eq!(reflect_index(-1, 5), 0);
/// assert_eq!(reflect_index(-2, 5), 1);
/// assert_eq!(reflect_index(5, 5), 4);
/// assert_eq!(reflect_index(6, 5), 3);
/// ```
#[inline]
pub fn reflect_index(i: i64, len: i64) -> i64 {
    let r = i.rem_euclid(2 * len);
    if r < len { r } else { 2 * len - 1 - r }
}

/// Convolve a field with a kernel.
///
/// The output has the same dimensions as the input and may hold negative
/// values.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if the kernel is wider or taller
/// than the field.
pub fn convolve(field: &ScalarField, kernel: &Kernel) -> FilterResult<ScalarField> {
    check_kernel_fits(field, kernel)?;

    let w = field.width() as i64;
    let h = field.height() as i64;
    let kw = kernel.width() as i64;
    let kh = kernel.height() as i64;
    let cx = kernel.center_x() as i64;
    let cy = kernel.center_y() as i64;
    let kdata = kernel.data();

    // Resolve the reflected column index for every (x, kx) once.
    let xmap: Vec<usize> = (0..w)
        .flat_map(|x| (0..kw).map(move |kx| reflect_index(x + kx - cx, w) as usize))
        .collect();

    let mut out = field.create_template();
    let dst = out.data_mut();

    for y in 0..h {
        let dst_row = &mut dst[(y * w) as usize..((y + 1) * w) as usize];
        for ky in 0..kh {
            let sy = reflect_index(y + ky - cy, h) as u32;
            let src_row = field.row(sy);
            let krow = &kdata[(ky * kw) as usize..((ky + 1) * kw) as usize];
            for (x, acc) in dst_row.iter_mut().enumerate() {
                let cols = &xmap[x * kw as usize..(x + 1) * kw as usize];
                for (&k, &sx) in krow.iter().zip(cols) {
                    *acc += k * src_row[sx];
                }
            }
        }
    }

    Ok(out)
}

fn check_kernel_fits(field: &ScalarField, kernel: &Kernel) -> FilterResult<()> {
    if kernel.width() > field.width() || kernel.height() > field.height() {
        return Err(FilterError::InvalidKernel(format!(
            "{}x{} kernel does not fit {}x{} field",
            kernel.width(),
            kernel.height(),
            field.width(),
            field.height()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_field() -> ScalarField {
        let mut field = ScalarField::new(5, 5).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                field.set_pixel(x, y, (x * 50 + y * 10) as f64).unwrap();
            }
        }
        field
    }

    #[test]
    fn test_reflect_index() {
        let expected = [(-3, 2), (-2, 1), (-1, 0), (0, 0), (4, 4), (5, 4), (6, 3), (7, 2)];
        for (i, want) in expected {
            assert_eq!(reflect_index(i, 5), want, "index {}", i);
        }
        for i in -4..=4 {
            assert_eq!(reflect_index(i, 1), 0);
        }
    }

    #[test]
    fn test_convolve_identity() {
        let field = create_test_field();
        let kernel = Kernel::from_slice(3, 3, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        let result = convolve(&field, &kernel).unwrap();
        assert_eq!(result, field);
    }

    #[test]
    fn test_convolve_does_not_flip() {
        // A shift kernel reading the right neighbor
        let field = ScalarField::from_rows(&[[1.0, 2.0, 3.0, 4.0]]).unwrap();
        let kernel = Kernel::from_slice(3, 1, &[0.0, 0.0, 1.0]).unwrap();
        let result = convolve(&field, &kernel).unwrap();
        // Last sample reflects onto itself
        assert_eq!(result.data(), &[2.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn test_convolve_reflect_border() {
        let field = ScalarField::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        let kernel = Kernel::from_slice(3, 1, &[1.0, 0.0, 0.0]).unwrap();
        let result = convolve(&field, &kernel).unwrap();
        // Index -1 reads index 0
        assert_eq!(result.data(), &[1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_convolve_prewitt_on_ramp() {
        // f(x, y) = 50x + 10y: interior horizontal derivative is 3 * 2 * 50
        let field = create_test_field();
        let result = convolve(&field, &Kernel::prewitt_x()).unwrap();
        assert_eq!(result.get_pixel(2, 2).unwrap(), 300.0);
        // Left column: reflection gives f(-1) = f(0), so 3 * 50
        assert_eq!(result.get_pixel(0, 2).unwrap(), 150.0);
    }

    #[test]
    fn test_convolve_constant_zero_sum() {
        let field = ScalarField::new_with_value(6, 4, 0.7).unwrap();
        for kernel in [Kernel::roberts_x(), Kernel::sobel_y(), Kernel::frei_chen_x()] {
            let result = convolve(&field, &kernel).unwrap();
            assert!(result.data().iter().all(|&v| v.abs() < 1e-12));
        }
    }

    #[test]
    fn test_convolve_kernel_too_large() {
        let field = ScalarField::new(2, 2).unwrap();
        assert!(matches!(
            convolve(&field, &Kernel::sobel_x()),
            Err(FilterError::InvalidKernel(_))
        ));
        // 2x2 fits exactly
        assert!(convolve(&field, &Kernel::roberts_x()).is_ok());
    }

    #[test]
    fn test_convolve_does_not_mutate_input() {
        let field = create_test_field();
        let copy = field.clone();
        let _ = convolve(&field, &Kernel::sobel_x()).unwrap();
        assert_eq!(field, copy);
    }
}
