//! GrayImage - 8-bit grayscale raster
//!
//! The storage form of a finished edge map. Produced by
//! [`ScalarField::to_gray_image`](crate::ScalarField::to_gray_image) and
//! consumed by the PNG encoder in `edgemap-io`.

use crate::error::{Error, Result};

/// 8-bit grayscale image, row-major with no padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayImage {
    /// Create a black image
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self::from_raw(
            width,
            height,
            vec![0; (width as usize) * (height as usize)],
        ))
    }

    /// Create an image from raw row-major bytes
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self::from_raw(width, height, data))
    }

    /// Callers in this crate guarantee `data.len() == width * height`.
    pub(crate) fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        GrayImage {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the pixel at (x, y), or `None` when out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// Set the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        self.data[idx] = value;
        Ok(())
    }

    /// Raw row-major bytes
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
