//! Transform domain embedding and extraction, one bit per 8x8 block.
//!
//! Embedding runs luminance -> [`SubbandTransform::forward`] -> block DCT ->
//! coefficient pair modulation -> block IDCT -> [`SubbandTransform::inverse`]
//! and finally adds the luminance change back onto the color channels.
//! Extraction repeats the analysis half and reads the sign of the pair.

mod luminance;

use image::{GenericImageView, Pixel, RgbaImage};
use log::debug;
use rayon::prelude::*;

use crate::error::WatermarkError;
use crate::options::EngineOptions;
use crate::result::Result;
use crate::transform::{
    Block, BlockDct, Matrix, SubbandTransform, TransformStrategy, BLOCK_SIZE,
};

pub use luminance::{apply_luminance_delta, luma, luminance};

/// Coefficient that is pushed up for a `1` bit, (row, column).
const PAIR_HIGH: (usize, usize) = (4, 3);
/// Coefficient that is pushed down for a `1` bit, (row, column).
const PAIR_LOW: (usize, usize) = (3, 4);

#[derive(Debug, Clone)]
pub struct WatermarkEngine {
    strength: f64,
    transform: TransformStrategy,
    dct: BlockDct,
}

impl WatermarkEngine {
    pub fn new(options: EngineOptions) -> Result<Self> {
        if !(options.strength.is_finite() && options.strength > 0.0) {
            return Err(WatermarkError::InvalidStrength(options.strength));
        }

        Ok(Self {
            strength: options.strength,
            transform: options.transform,
            dct: BlockDct::new(),
        })
    }

    /// Bits an image of `width` x `height` pixels can carry.
    pub fn capacity(&self, width: u32, height: u32) -> usize {
        self.transform.capacity(width as usize, height as usize)
    }

    /// Embeds `bits` and returns the watermarked copy of `image`.
    ///
    /// The copy has the working dimensions of the transform, for the wavelet
    /// that is `image` cropped to even width and height. Fails without doing
    /// anything if `bits` exceeds [`Self::capacity`].
    pub fn embed<I>(&self, image: &I, bits: &[bool]) -> Result<RgbaImage>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        let (width, height) = self.working_size(image);
        let plan = self.transform.block_plan(width, height);
        if bits.len() > plan.len() {
            return Err(WatermarkError::CapacityExceeded {
                required: bits.len(),
                available: plan.len(),
            });
        }
        debug!(
            "embedding {} bits into a {width}x{height} image with a capacity of {} bits",
            bits.len(),
            plan.len()
        );

        let luma = luminance(image, width, height);
        let mut coefficients = self.transform.forward(&luma);

        let modulated: Vec<((usize, usize), Block)> = plan[..bits.len()]
            .par_iter()
            .zip(bits.par_iter())
            .map(|(&position, &bit)| {
                let mut block = self.dct.forward(&read_block(&coefficients, position));
                modulate(&mut block, bit, self.strength);
                (position, self.dct.inverse(&block))
            })
            .collect();
        for (position, block) in modulated.iter() {
            write_block(&mut coefficients, *position, block);
        }

        let restored = self.transform.inverse(&coefficients);

        Ok(apply_luminance_delta(image, &luma, &restored))
    }

    /// Reads one bit from every block of the sub-band.
    ///
    /// The result always has [`Self::capacity`] bits, the framing decides how
    /// many of them belong to the payload.
    pub fn extract<I>(&self, image: &I) -> Vec<bool>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        let (width, height) = self.working_size(image);
        let plan = self.transform.block_plan(width, height);
        debug!("extracting {} bits from a {width}x{height} image", plan.len());

        let luma = luminance(image, width, height);
        let coefficients = self.transform.forward(&luma);

        plan.par_iter()
            .map(|&position| demodulate(&self.dct.forward(&read_block(&coefficients, position))))
            .collect()
    }

    fn working_size<I: GenericImageView>(&self, image: &I) -> (usize, usize) {
        let (width, height) = image.dimensions();
        self.transform.working_size(width as usize, height as usize)
    }
}

/// Forces `v1 - v2 >= strength` for a `1` and `v2 - v1 >= strength` for a `0`,
/// moving both coefficients by the same amount.
pub(crate) fn modulate(block: &mut Block, bit: bool, strength: f64) {
    let v1 = block[PAIR_HIGH.0][PAIR_HIGH.1];
    let v2 = block[PAIR_LOW.0][PAIR_LOW.1];

    let (v1, v2) = if bit {
        separate(v1, v2, strength)
    } else {
        let (v2, v1) = separate(v2, v1, strength);
        (v1, v2)
    };

    block[PAIR_HIGH.0][PAIR_HIGH.1] = v1;
    block[PAIR_LOW.0][PAIR_LOW.1] = v2;
}

fn separate(upper: f64, lower: f64, strength: f64) -> (f64, f64) {
    let distance = upper - lower;
    if distance < strength {
        let adjust = (strength - distance) / 2.0;
        (upper + adjust, lower - adjust)
    } else {
        (upper, lower)
    }
}

pub(crate) fn demodulate(block: &Block) -> bool {
    block[PAIR_HIGH.0][PAIR_HIGH.1] >= block[PAIR_LOW.0][PAIR_LOW.1]
}

fn read_block(matrix: &Matrix, (x0, y0): (usize, usize)) -> Block {
    let mut block = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
    for (row, values) in block.iter_mut().enumerate() {
        for (col, value) in values.iter_mut().enumerate() {
            *value = matrix.get(x0 + col, y0 + row);
        }
    }
    block
}

fn write_block(matrix: &mut Matrix, (x0, y0): (usize, usize), block: &Block) {
    for (row, values) in block.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            matrix.set(x0 + col, y0 + row, *value);
        }
    }
}
