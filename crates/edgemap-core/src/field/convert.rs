//! Conversion between `ScalarField` and `GrayImage`
//!
//! - [`ScalarField::to_gray_image`] quantizes a [0, 1] field to 8 bits
//! - [`ScalarField::from_gray_image`] lifts 8-bit samples to [0, 1]

use super::ScalarField;
use crate::error::Result;
use crate::gray::GrayImage;

/// Quantize one normalized sample to a byte.
///
/// Values are clipped to [0, 1] first; NaN maps to 0.
#[inline]
pub fn quantize_sample(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl ScalarField {
    /// Quantize to an 8-bit grayscale image.
    ///
    /// Each sample becomes `round(clip(x, 0, 1) * 255)`. Out-of-range
    /// values (e.g. after a linear scale > 1) are clipped here, not earlier.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_core::ScalarField;
    ///
    /// let field = ScalarField::from_rows(&[[-0.5, 0.5, 1.0, 2.0]]).unwrap();
    /// let gray = field.to_gray_image();
    /// assert_eq!(gray.data(), &[0, 128, 255, 255]);
    /// ```
    pub fn to_gray_image(&self) -> GrayImage {
        let data = self.data.iter().map(|&v| quantize_sample(v)).collect();
        GrayImage::from_raw(self.width, self.height, data)
    }

    /// Build a field in [0, 1] from an 8-bit grayscale image.
    pub fn from_gray_image(image: &GrayImage) -> Result<ScalarField> {
        let data = image.data().iter().map(|&v| v as f64 / 255.0).collect();
        ScalarField::from_data(image.width(), image.height(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_sample_rounding() {
        assert_eq!(quantize_sample(0.0), 0);
        assert_eq!(quantize_sample(1.0), 255);
        // 0.5 * 255 = 127.5 rounds away from zero
        assert_eq!(quantize_sample(0.5), 128);
        assert_eq!(quantize_sample(0.8), 204);
        assert_eq!(quantize_sample(-3.0), 0);
        assert_eq!(quantize_sample(7.0), 255);
        assert_eq!(quantize_sample(f64::NAN), 0);
        assert_eq!(quantize_sample(f64::INFINITY), 255);
    }

    #[test]
    fn test_to_gray_image_preserves_shape() {
        let field = ScalarField::new_with_value(7, 3, 0.25).unwrap();
        let gray = field.to_gray_image();
        assert_eq!(gray.dimensions(), (7, 3));
        assert!(gray.data().iter().all(|&v| v == 64));
    }

    #[test]
    fn test_from_gray_image() {
        let gray = GrayImage::from_raw(2, 1, vec![0, 255]);
        let field = ScalarField::from_gray_image(&gray).unwrap();
        assert_eq!(field.data(), &[0.0, 1.0]);
    }
}
