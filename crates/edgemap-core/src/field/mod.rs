//! ScalarField - Floating-point 2D field
//!
//! `ScalarField` is a 2D array of `f64` values. It carries image intensity
//! on the way into the pipeline and gradient magnitude / normalized edge
//! strength on the way out.
//!
//! See [`convert`] for quantization to 8-bit images.
//!
//! # Examples
//!
//! ```
//! use edgemap_core::ScalarField;
//!
//! let mut field = ScalarField::new(100, 100).unwrap();
//! field.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(field.get_pixel(10, 20).unwrap(), 0.5);
//!
//! let (lo, hi) = field.min_max();
//! assert_eq!((lo, hi), (0.0, 0.5));
//! ```

pub mod convert;

use crate::error::{Error, Result};

/// Floating-point 2D field
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The value at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    /// Width in samples
    width: u32,
    /// Height in samples
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<f64>,
}

impl ScalarField {
    /// Create a new field with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new field with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_core::ScalarField;
    ///
    /// let field = ScalarField::new_with_value(4, 3, 0.25).unwrap();
    /// assert!(field.data().iter().all(|&v| v == 0.25));
    /// ```
    pub fn new_with_value(width: u32, height: u32, value: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(ScalarField {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a field from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(ScalarField {
            width,
            height,
            data,
        })
    }

    /// Create a field from a list of rows
    ///
    /// All rows must have the same, non-zero length.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_core::ScalarField;
    ///
    /// let field = ScalarField::from_rows(&[[0.0, 1.0], [2.0, 3.0]]).unwrap();
    /// assert_eq!(field.dimensions(), (2, 2));
    /// assert_eq!(field.get_pixel(0, 1).unwrap(), 2.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().len()) as u32;

        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width as usize {
                return Err(Error::InvalidParameter(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            data.extend_from_slice(row);
        }

        Self::from_data(width, height, data)
    }

    /// Get the field width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the field height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed field; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Get the value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f64 {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx]
    }

    /// Set the value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f64) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get a row of sample data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f64] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Create a zeroed field with the same dimensions.
    pub fn create_template(&self) -> ScalarField {
        ScalarField {
            width: self.width,
            height: self.height,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Apply `f` to every sample, returning a new field.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgemap_core::ScalarField;
    ///
    /// let field = ScalarField::from_rows(&[[1.0, 2.0]]).unwrap();
    /// let doubled = field.map(|v| v * 2.0);
    /// assert_eq!(doubled.data(), &[2.0, 4.0]);
    /// assert_eq!(field.data(), &[1.0, 2.0]);
    /// ```
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> ScalarField {
        ScalarField {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two same-size fields sample by sample.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn zip_map<F: Fn(f64, f64) -> f64>(&self, other: &ScalarField, f: F) -> Result<ScalarField> {
        self.check_same_size(other)?;
        Ok(ScalarField {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Check that two fields have the same dimensions
    pub fn check_same_size(&self, other: &ScalarField) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Minimum sample value
    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Maximum sample value
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Minimum and maximum in a single pass, as `(min, max)`
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Mean of all samples
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// True when no sample is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = ScalarField::new(100, 200).unwrap();
        assert_eq!(field.width(), 100);
        assert_eq!(field.height(), 200);
        assert_eq!(field.dimensions(), (100, 200));
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_field_invalid_dimensions() {
        assert!(ScalarField::new(0, 100).is_err());
        assert!(ScalarField::new(100, 0).is_err());
        assert!(ScalarField::from_data(0, 0, vec![]).is_err());
    }

    #[test]
    fn test_field_from_data() {
        let field = ScalarField::from_data(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(field.get_pixel(0, 0).unwrap(), 1.0);
        assert_eq!(field.get_pixel(2, 0).unwrap(), 3.0);
        assert_eq!(field.get_pixel(0, 1).unwrap(), 4.0);
        assert_eq!(field.get_pixel(2, 1).unwrap(), 6.0);
    }

    #[test]
    fn test_field_from_data_wrong_size() {
        assert!(ScalarField::from_data(3, 2, vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_field_from_rows_ragged() {
        let rows: [&[f64]; 2] = [&[1.0, 2.0], &[3.0]];
        assert!(ScalarField::from_rows(&rows).is_err());
        let empty: [[f64; 0]; 0] = [];
        assert!(ScalarField::from_rows(&empty).is_err());
    }

    #[test]
    fn test_field_pixel_access_out_of_bounds() {
        let mut field = ScalarField::new(10, 10).unwrap();
        assert!(field.get_pixel(10, 0).is_err());
        assert!(field.get_pixel(0, 10).is_err());
        assert!(field.set_pixel(10, 10, 1.0).is_err());
    }

    #[test]
    fn test_field_row() {
        let field = ScalarField::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(field.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_field_zip_map_size_mismatch() {
        let a = ScalarField::new(3, 3).unwrap();
        let b = ScalarField::new(3, 4).unwrap();
        assert!(matches!(
            a.zip_map(&b, |x, y| x + y),
            Err(Error::IncompatibleSizes(3, 3, 3, 4))
        ));
    }

    #[test]
    fn test_field_statistics() {
        let field = ScalarField::from_rows(&[[-1.0, 0.5], [3.0, 1.5]]).unwrap();
        assert_eq!(field.min_value(), -1.0);
        assert_eq!(field.max_value(), 3.0);
        assert_eq!(field.min_max(), (-1.0, 3.0));
        assert_eq!(field.mean(), 1.0);
        assert!(field.is_finite());
        assert!(!field.map(|v| v / 0.0).is_finite());
    }
}
