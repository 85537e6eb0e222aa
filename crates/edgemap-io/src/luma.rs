//! Luminance conversion
//!
//! Decoders hand over normalized channel samples; this module reduces them
//! to a single intensity in [0, 1].

/// Red weight of the luminance transform
pub const LUMA_R: f64 = 0.2125;
/// Green weight of the luminance transform
pub const LUMA_G: f64 = 0.7154;
/// Blue weight of the luminance transform
pub const LUMA_B: f64 = 0.0721;

/// Weighted luminance of normalized RGB.
#[inline]
pub fn luminance(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Intensity of one pixel given its normalized channel samples.
///
/// One or two channels are gray (alpha dropped); three or four are RGB
/// (alpha dropped).
#[inline]
pub(crate) fn pixel_intensity(channels: &[f64]) -> f64 {
    match channels {
        [g] | [g, _] => *g,
        [r, g, b] | [r, g, b, _] => luminance(*r, *g, *b),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((LUMA_R + LUMA_G + LUMA_B - 1.0).abs() < 1e-12);
        assert!((luminance(1.0, 1.0, 1.0) - 1.0).abs() < 1e-12);
        assert_eq!(luminance(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_pixel_intensity_drops_alpha() {
        assert_eq!(pixel_intensity(&[0.25]), 0.25);
        assert_eq!(pixel_intensity(&[0.25, 0.0]), 0.25);
        assert_eq!(pixel_intensity(&[0.0, 1.0, 0.0, 0.5]), LUMA_G);
        assert_eq!(pixel_intensity(&[1.0, 0.0, 0.0]), LUMA_R);
    }
}
