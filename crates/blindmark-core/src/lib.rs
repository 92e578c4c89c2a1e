//! # Blindmark Core API
//!
//! Blind watermarking of images in the transform domain. A typed payload is
//! framed into bits and every bit is carried by the sign of a coefficient
//! pair inside one 8x8 DCT block of the Haar high-low sub-band. Extraction
//! needs nothing but the watermarked image.
//!
//! The entry points are
//! - [`Watermarker`][wm] for working on in-memory images
//! - [`api::hide`] and [`api::unveil`] for working on files
//!
//! # Usage Examples
//!
//! ## Hide a text inside an image
//!
//! ```rust
//! use blindmark_core::{Watermark, WatermarkOptions, Watermarker};
//! use image::{Rgba, RgbaImage};
//!
//! let carrier = RgbaImage::from_fn(256, 256, |x, y| {
//!     let v = (100 + (x + y) / 8) as u8;
//!     Rgba([v, v, v, 255])
//! });
//!
//! let watermarker = Watermarker::new(WatermarkOptions::default())
//!     .expect("default options are valid");
//! let watermarked = watermarker
//!     .embed_text(&carrier, "Hello")
//!     .expect("Failed to embed text");
//!
//! let extracted = watermarker
//!     .extract(&watermarked)
//!     .expect("Failed to extract watermark");
//! assert_eq!(extracted.watermark, Watermark::Text("Hello".to_string()));
//! ```
//!
//! ## Unveil a watermark from a file
//!
//! ```rust,no_run
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//!
//! blindmark_core::api::unveil::prepare()
//!     .from_watermarked_image("watermarked.png")
//!     .into_output_folder(temp_dir.path())
//!     .execute()
//!     .expect("Failed to unveil watermark from image");
//! ```
//!
//! [wm]: ./struct.Watermarker.html

#![warn(clippy::redundant_else)]

pub mod api;
pub mod commands;
pub mod engine;
pub mod error;
pub mod media;
pub mod options;
pub mod payload;
pub mod protocol;
pub mod result;
pub mod transform;

use image::{GenericImageView, Pixel, RgbaImage};
use log::debug;

pub use crate::engine::WatermarkEngine;
pub use crate::error::WatermarkError;
pub use crate::options::{BitmapOptions, EngineOptions, WatermarkOptions};
pub use crate::payload::{Extracted, IntegrityWarning, Watermark};
pub use crate::protocol::{pack, unpack, PayloadType};
pub use crate::result::Result;
pub use crate::transform::{DirectTiling, HaarWavelet, Subband, TransformStrategy};

use crate::payload::bitmap;
use crate::protocol::{Frame, FRAME_HEADER_LEN};

/// Frames payloads, plans capacity and drives the [`WatermarkEngine`].
#[derive(Debug, Clone)]
pub struct Watermarker {
    engine: WatermarkEngine,
    bitmap: BitmapOptions,
}

impl Watermarker {
    pub fn new(options: WatermarkOptions) -> Result<Self> {
        Ok(Self {
            engine: WatermarkEngine::new(options.engine)?,
            bitmap: options.bitmap,
        })
    }

    pub fn engine(&self) -> &WatermarkEngine {
        &self.engine
    }

    /// Bits `image` can carry, frame header included.
    pub fn capacity<I: GenericImageView>(&self, image: &I) -> usize {
        let (width, height) = image.dimensions();
        self.capacity_bits(width, height)
    }

    pub fn capacity_bits(&self, width: u32, height: u32) -> usize {
        self.engine.capacity(width, height)
    }

    /// Largest payload in bytes an image of the given size can carry.
    pub fn payload_capacity(&self, width: u32, height: u32) -> usize {
        (self.capacity_bits(width, height) / 8).saturating_sub(FRAME_HEADER_LEN)
    }

    pub fn embed_text<I>(&self, image: &I, text: &str) -> Result<RgbaImage>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        self.embed_payload(image, PayloadType::Text, text.as_bytes())
    }

    /// Stores the content of a QR code, not its pixels.
    pub fn embed_qr_code<I>(&self, image: &I, content: &str) -> Result<RgbaImage>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        self.embed_payload(image, PayloadType::QrCode, content.as_bytes())
    }

    /// Embeds `watermark` as black and white bitmap.
    ///
    /// A watermark that does not fit is scaled down first, unless
    /// [`BitmapOptions::auto_downscale`] is off.
    pub fn embed_image<I, W>(&self, image: &I, watermark: &W) -> Result<RgbaImage>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
        W: GenericImageView,
        W::Pixel: Pixel<Subpixel = u8>,
    {
        let mut gray = bitmap::to_grayscale(watermark);
        if self.bitmap.auto_downscale {
            gray = bitmap::fit_bitmap(gray, self.capacity(image))?;
        }
        let data = bitmap::encode_bitmap(&gray, self.bitmap.threshold)?;

        self.embed_payload(image, PayloadType::Image, &data)
    }

    pub fn embed<I>(&self, image: &I, watermark: &Watermark) -> Result<RgbaImage>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        match watermark {
            Watermark::Text(text) => self.embed_text(image, text),
            Watermark::QrCode(content) => self.embed_qr_code(image, content),
            Watermark::Image(bitmap) => self.embed_image(image, bitmap),
            Watermark::Unknown { tag, data } => {
                self.embed_payload(image, PayloadType::from(*tag), data)
            }
        }
    }

    /// Frames `data` with `payload_type` and embeds it.
    ///
    /// Fails with [`WatermarkError::CapacityExceeded`] before touching any
    /// pixel if the frame needs more bits than `image` offers.
    pub fn embed_payload<I>(&self, image: &I, payload_type: PayloadType, data: &[u8]) -> Result<RgbaImage>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        let available = self.capacity(image);
        let required = Frame::bit_len(data.len());
        if required > available {
            return Err(WatermarkError::CapacityExceeded {
                required,
                available,
            });
        }

        let bits = pack(payload_type, data)?;
        debug!("embedding {payload_type} payload of {} bytes", data.len());

        self.engine.embed(image, &bits)
    }

    /// Unframed payload, not interpreted in any way.
    pub fn extract_raw<I>(&self, image: &I) -> Result<(PayloadType, Vec<u8>)>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        unpack(&self.engine.extract(image))
    }

    /// All extracted bytes, frame header and trailing noise included.
    pub fn extract_bytes<I>(&self, image: &I) -> Result<Vec<u8>>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        protocol::bits_to_bytes(&self.engine.extract(image))
    }

    pub fn extract<I>(&self, image: &I) -> Result<Extracted>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        let (payload_type, data) = self.extract_raw(image)?;
        debug!("extracted {payload_type} payload of {} bytes", data.len());
        let (watermark, warnings) = Watermark::from_payload(payload_type, data)?;

        Ok(Extracted {
            watermark,
            warnings,
        })
    }
}
