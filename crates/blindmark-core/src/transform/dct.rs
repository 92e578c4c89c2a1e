//! Orthonormal 8x8 DCT-II / DCT-III pair.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

pub const BLOCK_SIZE: usize = 8;

/// An 8x8 block, indexed as `block[row][column]`.
pub type Block = [[f64; BLOCK_SIZE]; BLOCK_SIZE];

/// Separable block cosine transform with a precomputed basis.
///
/// `basis[k][n] = c(k) / 2 * cos((2n + 1) * k * PI / 16)` with `c(0) = 1/sqrt(2)`
/// and `c(k) = 1` otherwise, so applying it along both axes yields the usual
/// `c(u) * c(v) / 4` normalization of the 2-D transform.
#[derive(Debug, Clone)]
pub struct BlockDct {
    basis: Block,
}

impl Default for BlockDct {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDct {
    pub fn new() -> Self {
        let mut basis = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for (k, row) in basis.iter_mut().enumerate() {
            let scale = if k == 0 { FRAC_1_SQRT_2 } else { 1.0 };
            for (n, value) in row.iter_mut().enumerate() {
                let angle = (2 * n + 1) as f64 * k as f64 * PI / (2 * BLOCK_SIZE) as f64;
                *value = scale * angle.cos() / 2.0;
            }
        }

        Self { basis }
    }

    /// spatial block -> coefficients
    pub fn forward(&self, block: &Block) -> Block {
        let b = &self.basis;
        let mut rows = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for u in 0..BLOCK_SIZE {
            for y in 0..BLOCK_SIZE {
                rows[u][y] = (0..BLOCK_SIZE).map(|x| b[u][x] * block[x][y]).sum();
            }
        }

        let mut out = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for u in 0..BLOCK_SIZE {
            for v in 0..BLOCK_SIZE {
                out[u][v] = (0..BLOCK_SIZE).map(|y| b[v][y] * rows[u][y]).sum();
            }
        }
        out
    }

    /// coefficients -> spatial block
    pub fn inverse(&self, coefficients: &Block) -> Block {
        let b = &self.basis;
        let mut rows = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for x in 0..BLOCK_SIZE {
            for v in 0..BLOCK_SIZE {
                rows[x][v] = (0..BLOCK_SIZE).map(|u| b[u][x] * coefficients[u][v]).sum();
            }
        }

        let mut out = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for x in 0..BLOCK_SIZE {
            for y in 0..BLOCK_SIZE {
                out[x][y] = (0..BLOCK_SIZE).map(|v| b[v][y] * rows[x][v]).sum();
            }
        }
        out
    }
}
