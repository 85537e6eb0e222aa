//! Convolution kernels
//!
//! Defines the kernel structure used by the convolution engine, plus the
//! fixed gradient kernel pairs of the four operator families.
//!
//! All gradient kernels are written row by row, top to bottom, exactly as
//! they are applied: the convolution engine correlates and never flips.

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
///
/// The anchor `(cx, cy)` is the kernel cell that lands on the output sample.
/// It defaults to `((width - 1) / 2, (height - 1) / 2)`: the middle cell of
/// odd kernels and the top-left cell of 2x2 kernels.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the anchor
    cx: u32,
    /// Y coordinate of the anchor
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a zeroed kernel with the given dimensions.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be > 0, got {}x{}",
                width, height
            )));
        }
        Ok(Kernel {
            width,
            height,
            cx: (width - 1) / 2,
            cy: (height - 1) / 2,
            data: vec![0.0; (width as usize) * (height as usize)],
        })
    }

    /// Create a kernel from a row-major slice of values.
    pub fn from_slice(width: u32, height: u32, data: &[f64]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for a {}x{} kernel, got {}",
                kernel.data.len(),
                width,
                height,
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Build a kernel from fixed-size rows.
    fn from_rows<const W: usize, const H: usize>(rows: [[f64; W]; H]) -> Self {
        Kernel {
            width: W as u32,
            height: H as u32,
            cx: (W as u32 - 1) / 2,
            cy: (H as u32 - 1) / 2,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Roberts cross, first diagonal.
    pub fn roberts_x() -> Self {
        Self::from_rows([[1.0, 0.0], [0.0, -1.0]])
    }

    /// Roberts cross, second diagonal.
    pub fn roberts_y() -> Self {
        Self::from_rows([[0.0, 1.0], [-1.0, 0.0]])
    }

    /// Prewitt horizontal derivative.
    pub fn prewitt_x() -> Self {
        Self::from_rows([[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]])
    }

    /// Prewitt vertical derivative.
    pub fn prewitt_y() -> Self {
        Self::from_rows([[1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -1.0, -1.0]])
    }

    /// Sobel horizontal derivative.
    pub fn sobel_x() -> Self {
        Self::from_rows([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]])
    }

    /// Sobel vertical derivative.
    pub fn sobel_y() -> Self {
        Self::from_rows([[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]])
    }

    /// Frei-Chen first gradient mask (responds to horizontal edges).
    pub fn frei_chen_x() -> Self {
        let s2 = std::f64::consts::SQRT_2;
        Self::from_rows([[1.0, s2, 1.0], [0.0, 0.0, 0.0], [-1.0, -s2, -1.0]])
    }

    /// Frei-Chen second gradient mask (responds to vertical edges).
    pub fn frei_chen_y() -> Self {
        let s2 = std::f64::consts::SQRT_2;
        Self::from_rows([[1.0, 0.0, -1.0], [s2, 0.0, -s2], [1.0, 0.0, -1.0]])
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the anchor X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the anchor Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Move the anchor.
    pub fn set_center(&mut self, cx: u32, cy: u32) -> FilterResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(FilterError::InvalidKernel(format!(
                "center ({}, {}) outside {}x{} kernel",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_new_and_anchor() {
        let k = Kernel::new(3, 3).unwrap();
        assert_eq!((k.center_x(), k.center_y()), (1, 1));
        let k = Kernel::new(2, 2).unwrap();
        assert_eq!((k.center_x(), k.center_y()), (0, 0));
        assert!(Kernel::new(0, 3).is_err());
    }

    #[test]
    fn test_kernel_from_slice() {
        let k = Kernel::from_slice(3, 1, &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(k.get(2, 0), Some(3.0));
        assert_eq!(k.get(3, 0), None);
        assert!(Kernel::from_slice(2, 2, &[1.0]).is_err());
    }

    #[test]
    fn test_kernel_set_center() {
        let mut k = Kernel::new(3, 3).unwrap();
        k.set_center(2, 0).unwrap();
        assert_eq!((k.center_x(), k.center_y()), (2, 0));
        assert!(k.set_center(3, 0).is_err());
    }

    #[test]
    fn test_gradient_kernels_have_zero_sum() {
        for k in [
            Kernel::roberts_x(),
            Kernel::roberts_y(),
            Kernel::prewitt_x(),
            Kernel::prewitt_y(),
            Kernel::sobel_x(),
            Kernel::sobel_y(),
            Kernel::frei_chen_x(),
            Kernel::frei_chen_y(),
        ] {
            assert!(k.sum().abs() < 1e-12, "kernel {:?} does not sum to zero", k);
        }
    }

    #[test]
    fn test_gradient_kernel_layout() {
        let k = Kernel::sobel_x();
        assert_eq!(k.get(0, 1), Some(-2.0));
        assert_eq!(k.get(2, 1), Some(2.0));
        let k = Kernel::roberts_y();
        assert_eq!(k.data(), &[0.0, 1.0, -1.0, 0.0]);
        let k = Kernel::frei_chen_y();
        assert_eq!(k.get(0, 1), Some(std::f64::consts::SQRT_2));
    }
}
