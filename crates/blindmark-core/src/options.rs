//! Watermark configuration
//!
//! All options are plain values; the engine copies what it needs, so one
//! configuration can drive any number of independent embed/extract calls.

use crate::transform::{DirectTiling, HaarWavelet, Subband, TransformStrategy};

/// Default minimum separation of the coefficient pair.
pub const DEFAULT_STRENGTH: f64 = 20.0;

/// Default luminance above which a bitmap pixel counts as white.
pub const DEFAULT_BITMAP_THRESHOLD: u8 = 128;

/// Default JPEG quality (1-100) for watermarked output, kept high because
/// every quantization step eats into the coefficient margin.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Options for the transform domain engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Minimum enforced difference between the two coefficients of a pair.
    /// Larger values survive lossy re-encoding better but become visible.
    pub strength: f64,

    /// Where the bits are placed, see [`TransformStrategy`].
    pub transform: TransformStrategy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            transform: TransformStrategy::default(),
        }
    }
}

impl EngineOptions {
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_transform<T: Into<TransformStrategy>>(mut self, transform: T) -> Self {
        self.transform = transform.into();
        self
    }

    /// wavelet transform, bits in the given sub-band
    pub fn wavelet(band: Subband) -> Self {
        Self::default().with_transform(HaarWavelet::new(band))
    }

    /// no wavelet stage, the luminance is tiled directly
    pub fn direct() -> Self {
        Self::default().with_transform(DirectTiling)
    }
}

/// Options for bitmap watermarks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapOptions {
    /// Pixels with a luminance above this value are stored as white.
    pub threshold: u8,

    /// If true a bitmap that does not fit is shrunk, otherwise embedding
    /// fails with a capacity error.
    pub auto_downscale: bool,
}

impl Default for BitmapOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_BITMAP_THRESHOLD,
            auto_downscale: true,
        }
    }
}

/// Everything the [`Watermarker`](crate::Watermarker) and the file api need.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatermarkOptions {
    pub engine: EngineOptions,
    pub bitmap: BitmapOptions,
    /// JPEG quality used when the output file is a JPEG.
    pub jpeg_quality: Option<u8>,
}

impl WatermarkOptions {
    pub fn with_engine(mut self, engine: EngineOptions) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_bitmap(mut self, bitmap: BitmapOptions) -> Self {
        self.bitmap = bitmap;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality.unwrap_or(DEFAULT_JPEG_QUALITY)
    }
}
