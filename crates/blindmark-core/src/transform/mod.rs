pub mod dct;
pub mod dwt;
mod matrix;

use enum_dispatch::enum_dispatch;

pub use dct::{Block, BlockDct, BLOCK_SIZE};
pub use dwt::Subband;
pub use matrix::{Matrix, Region};

/// How the luminance matrix is turned into the domain that carries the bits.
#[enum_dispatch]
pub trait SubbandTransform {
    /// Dimensions of the luminance area the transform can work on.
    fn working_size(&self, width: usize, height: usize) -> (usize, usize);

    fn forward(&self, luma: &Matrix) -> Matrix;

    fn inverse(&self, coefficients: &Matrix) -> Matrix;

    /// The part of the forward transformed matrix that gets tiled into blocks.
    fn subband(&self, width: usize, height: usize) -> Region;
}

/// Global Haar transform, bits go into one of its quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HaarWavelet {
    pub band: Subband,
}

impl HaarWavelet {
    pub fn new(band: Subband) -> Self {
        Self { band }
    }
}

impl SubbandTransform for HaarWavelet {
    fn working_size(&self, width: usize, height: usize) -> (usize, usize) {
        (width - width % 2, height - height % 2)
    }

    fn forward(&self, luma: &Matrix) -> Matrix {
        dwt::forward_2d(luma)
    }

    fn inverse(&self, coefficients: &Matrix) -> Matrix {
        dwt::inverse_2d(coefficients)
    }

    fn subband(&self, width: usize, height: usize) -> Region {
        self.band.region(width, height)
    }
}

/// No global transform, the luminance itself is tiled into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectTiling;

impl SubbandTransform for DirectTiling {
    fn working_size(&self, width: usize, height: usize) -> (usize, usize) {
        (width, height)
    }

    fn forward(&self, luma: &Matrix) -> Matrix {
        luma.clone()
    }

    fn inverse(&self, coefficients: &Matrix) -> Matrix {
        coefficients.clone()
    }

    fn subband(&self, width: usize, height: usize) -> Region {
        Region::new(0, 0, width, height)
    }
}

#[enum_dispatch(SubbandTransform)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStrategy {
    Wavelet(HaarWavelet),
    Direct(DirectTiling),
}

impl Default for TransformStrategy {
    fn default() -> Self {
        Self::Wavelet(HaarWavelet::default())
    }
}

impl TransformStrategy {
    /// Top left corners of all whole blocks in the sub-band, row major.
    ///
    /// This order defines which bit goes into which block, embedding and
    /// extraction both walk it.
    pub fn block_plan(&self, width: usize, height: usize) -> Vec<(usize, usize)> {
        let (width, height) = self.working_size(width, height);
        let band = self.subband(width, height);
        let (cols, rows) = (band.width / BLOCK_SIZE, band.height / BLOCK_SIZE);

        (0..rows)
            .flat_map(|row| {
                (0..cols).map(move |col| (band.x + col * BLOCK_SIZE, band.y + row * BLOCK_SIZE))
            })
            .collect()
    }

    /// Number of bits an image of the given dimensions can carry.
    pub fn capacity(&self, width: usize, height: usize) -> usize {
        let (width, height) = self.working_size(width, height);
        let band = self.subband(width, height);

        (band.width / BLOCK_SIZE) * (band.height / BLOCK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compute_capacity_of_the_wavelet_subband() {
        let wavelet = TransformStrategy::default();

        assert_eq!(wavelet.capacity(16, 16), 1);
        assert_eq!(wavelet.capacity(256, 256), 256);
        assert_eq!(wavelet.capacity(17, 33), 2);
        assert_eq!(wavelet.capacity(15, 15), 0);
    }

    #[test]
    fn should_compute_capacity_of_direct_tiling() {
        let direct = TransformStrategy::Direct(DirectTiling);

        assert_eq!(direct.capacity(16, 16), 4);
        assert_eq!(direct.capacity(256, 256), 1024);
        assert_eq!(direct.capacity(17, 33), 8);
    }

    #[test]
    fn should_plan_blocks_row_major_inside_the_high_low_band() {
        let plan = TransformStrategy::default().block_plan(64, 32);

        // HL band of 64x32 starts at x=32 and is 32x16
        assert_eq!(
            plan,
            vec![
                (32, 0),
                (40, 0),
                (48, 0),
                (56, 0),
                (32, 8),
                (40, 8),
                (48, 8),
                (56, 8)
            ]
        );
        assert_eq!(plan.len(), TransformStrategy::default().capacity(64, 32));
    }

    #[test]
    fn should_plan_blocks_of_other_bands() {
        let lh = TransformStrategy::from(HaarWavelet::new(Subband::LowHigh));
        assert_eq!(lh.block_plan(32, 32), vec![(0, 16), (8, 16), (0, 24), (8, 24)]);

        let direct = TransformStrategy::from(DirectTiling);
        assert_eq!(direct.block_plan(16, 8), vec![(0, 0), (8, 0)]);
    }

    #[test]
    fn direct_tiling_should_be_the_identity() {
        let m = Matrix::from_fn(8, 8, |x, y| (x * y) as f64);
        let direct = TransformStrategy::Direct(DirectTiling);

        assert_eq!(direct.forward(&m), m);
        assert_eq!(direct.inverse(&m), m);
    }
}
