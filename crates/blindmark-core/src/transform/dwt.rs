//! Single level 2-D Haar wavelet transform.
//!
//! Each axis is split into a low half `(a + b) / sqrt(2)` followed by a high
//! half `(a - b) / sqrt(2)`. Rows are transformed first, then columns, which
//! leaves the four sub-bands as quadrants:
//!
//! ```text
//! LL | HL
//! ---+---
//! LH | HH
//! ```

use std::f64::consts::SQRT_2;

use super::matrix::{Matrix, Region};

/// One quadrant of a Haar transformed matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subband {
    /// approximation, top left
    LowLow,
    /// horizontal detail, top right
    #[default]
    HighLow,
    /// vertical detail, bottom left
    LowHigh,
    /// diagonal detail, bottom right
    HighHigh,
}

impl Subband {
    /// Location of the quadrant inside a transformed `width` x `height` matrix.
    pub fn region(&self, width: usize, height: usize) -> Region {
        let (half_w, half_h) = (width / 2, height / 2);
        match self {
            Subband::LowLow => Region::new(0, 0, half_w, half_h),
            Subband::HighLow => Region::new(half_w, 0, half_w, half_h),
            Subband::LowHigh => Region::new(0, half_h, half_w, half_h),
            Subband::HighHigh => Region::new(half_w, half_h, half_w, half_h),
        }
    }
}

/// `data.len()` must be even.
pub fn forward_1d(data: &[f64]) -> Vec<f64> {
    let half = data.len() / 2;
    let mut out = vec![0.0; data.len()];
    for i in 0..half {
        let (a, b) = (data[2 * i], data[2 * i + 1]);
        out[i] = (a + b) / SQRT_2;
        out[half + i] = (a - b) / SQRT_2;
    }
    out
}

pub fn inverse_1d(data: &[f64]) -> Vec<f64> {
    let half = data.len() / 2;
    let mut out = vec![0.0; data.len()];
    for i in 0..half {
        let (low, high) = (data[i], data[half + i]);
        out[2 * i] = (low + high) / SQRT_2;
        out[2 * i + 1] = (low - high) / SQRT_2;
    }
    out
}

/// Rows, then columns. Both dimensions of `matrix` must be even.
pub fn forward_2d(matrix: &Matrix) -> Matrix {
    debug_assert!(matrix.width() % 2 == 0 && matrix.height() % 2 == 0);

    let mut out = matrix.clone();
    for y in 0..out.height() {
        let row = forward_1d(out.row(y));
        out.row_mut(y).copy_from_slice(&row);
    }
    for x in 0..out.width() {
        let column = forward_1d(&out.column(x));
        out.set_column(x, &column);
    }
    out
}

/// Columns, then rows, mirroring [`forward_2d`].
pub fn inverse_2d(matrix: &Matrix) -> Matrix {
    debug_assert!(matrix.width() % 2 == 0 && matrix.height() % 2 == 0);

    let mut out = matrix.clone();
    for x in 0..out.width() {
        let column = inverse_1d(&out.column(x));
        out.set_column(x, &column);
    }
    for y in 0..out.height() {
        let row = inverse_1d(out.row(y));
        out.row_mut(y).copy_from_slice(&row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Matrix {
        Matrix::from_fn(width, height, |x, y| ((x * 7 + y * 13 + x * y) % 255) as f64 + 0.5)
    }

    #[test]
    fn should_split_pairs_into_average_and_difference() {
        let out = forward_1d(&[4.0, 2.0, 1.0, 1.0]);

        assert!((out[0] - 6.0 / SQRT_2).abs() < 1e-12);
        assert!((out[1] - 2.0 / SQRT_2).abs() < 1e-12);
        assert!((out[2] - 2.0 / SQRT_2).abs() < 1e-12);
        assert!(out[3].abs() < 1e-12);
        assert_eq!(inverse_1d(&out).len(), 4);
    }

    #[test]
    fn should_reconstruct_matrix_after_forward_and_inverse() {
        for (w, h) in [(2, 2), (16, 8), (34, 18)] {
            let m = ramp(w, h);
            let restored = inverse_2d(&forward_2d(&m));

            assert!(m.max_abs_diff(&restored) < 1e-9, "{w}x{h} not restored");
        }
    }

    #[test]
    fn should_leave_no_detail_for_flat_input() {
        let flat = Matrix::from_fn(16, 16, |_, _| 100.0);
        let out = forward_2d(&flat);

        for band in [Subband::HighLow, Subband::LowHigh, Subband::HighHigh] {
            let r = band.region(16, 16);
            for y in r.y..r.y + r.height {
                for x in r.x..r.x + r.width {
                    assert!(out.get(x, y).abs() < 1e-9, "{band:?} not empty at ({x}, {y})");
                }
            }
        }
        // approximation is scaled by 2 in 2-D
        assert!((out.get(3, 3) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn should_place_horizontal_detail_top_right() {
        // columns alternate, so every row pair differs horizontally only
        let stripes = Matrix::from_fn(8, 8, |x, _| if x % 2 == 0 { 10.0 } else { 0.0 });
        let out = forward_2d(&stripes);

        let hl = Subband::HighLow.region(8, 8);
        assert_eq!(hl, Region::new(4, 0, 4, 4));
        assert!((out.get(hl.x, hl.y) - 10.0).abs() < 1e-9);
        assert!(out.get(0, 4).abs() < 1e-9);
        assert!(out.get(4, 4).abs() < 1e-9);
    }
}
