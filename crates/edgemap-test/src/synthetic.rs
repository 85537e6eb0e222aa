//! Synthetic test fields
//!
//! Small deterministic inputs with known edge structure. All values lie
//! in [0, 1].

use crate::TestResult;
use edgemap_core::ScalarField;

/// Horizontal ramp from 0 at the left column to 1 at the right column.
pub fn ramp(width: u32, height: u32) -> TestResult<ScalarField> {
    let denom = width.saturating_sub(1).max(1) as f64;
    let row: Vec<f64> = (0..width).map(|x| x as f64 / denom).collect();
    let data = (0..height).flat_map(|_| row.iter().copied()).collect();
    Ok(ScalarField::from_data(width, height, data)?)
}

/// Vertical step edge: 0 left of column `x0`, 1 from `x0` on.
pub fn step(width: u32, height: u32, x0: u32) -> TestResult<ScalarField> {
    let data = (0..height)
        .flat_map(|_| (0..width).map(move |x| if x >= x0 { 1.0 } else { 0.0 }))
        .collect();
    Ok(ScalarField::from_data(width, height, data)?)
}

/// Bright disk of `radius` centered in a dark field.
pub fn disk(width: u32, height: u32, radius: f64) -> TestResult<ScalarField> {
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;
    let mut field = ScalarField::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= radius * radius {
                field.set_pixel_unchecked(x, y, 1.0);
            }
        }
    }
    Ok(field)
}

/// Checkerboard of `cell`-sized squares, starting dark at the origin.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> TestResult<ScalarField> {
    let cell = cell.max(1);
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if ((x / cell) + (y / cell)) % 2 == 1 {
                    1.0
                } else {
                    0.0
                }
            })
        })
        .collect();
    Ok(ScalarField::from_data(width, height, data)?)
}

/// Single bright sample at (x, y).
pub fn delta(width: u32, height: u32, x: u32, y: u32) -> TestResult<ScalarField> {
    let mut field = ScalarField::new(width, height)?;
    field.set_pixel(x, y, 1.0)?;
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        let f = ramp(5, 2).unwrap();
        assert_eq!(f.row(1), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(ramp(1, 1).unwrap().data(), &[0.0]);
    }

    #[test]
    fn test_step_and_checkerboard() {
        assert_eq!(step(4, 1, 2).unwrap().data(), &[0.0, 0.0, 1.0, 1.0]);
        let c = checkerboard(4, 2, 2).unwrap();
        assert_eq!(c.row(0), &[0.0, 0.0, 1.0, 1.0]);
        assert_eq!(c.row(1), &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_disk_and_delta() {
        let d = disk(9, 9, 2.0).unwrap();
        assert_eq!(d.get_pixel(4, 4).unwrap(), 1.0);
        assert_eq!(d.get_pixel(0, 0).unwrap(), 0.0);
        let p = delta(3, 3, 1, 2).unwrap();
        assert_eq!(p.data().iter().sum::<f64>(), 1.0);
        assert!(delta(3, 3, 3, 0).is_err());
        assert!(ramp(0, 3).is_err());
    }
}
