pub mod bitmap;

use std::fmt;

use image::GrayImage;
use log::warn;

pub use crate::protocol::PayloadType;
use crate::result::Result;

pub use bitmap::{decode_bitmap, encode_bitmap, fit_bitmap, to_grayscale};

/// A decoded watermark
#[derive(Debug, Clone, PartialEq)]
pub enum Watermark {
    Text(String),
    Image(GrayImage),
    /// content of a QR code, the code itself is never stored
    QrCode(String),
    /// payload with a tag this crate does not know, kept as is
    Unknown { tag: u8, data: Vec<u8> },
}

impl Watermark {
    pub fn payload_type(&self) -> PayloadType {
        match self {
            Watermark::Text(_) => PayloadType::Text,
            Watermark::Image(_) => PayloadType::Image,
            Watermark::QrCode(_) => PayloadType::QrCode,
            Watermark::Unknown { tag, .. } => PayloadType::from(*tag),
        }
    }

    /// Interprets the payload of an unpacked frame.
    ///
    /// Damaged content is not fatal. Invalid UTF-8 is replaced and broken
    /// bitmaps are filled, both are returned as warnings next to the best
    /// effort watermark.
    pub fn from_payload(
        payload_type: PayloadType,
        data: Vec<u8>,
    ) -> Result<(Self, Vec<IntegrityWarning>)> {
        let mut warnings = Vec::new();
        let watermark = match payload_type {
            PayloadType::Text => Watermark::Text(decode_text(data, &mut warnings)),
            PayloadType::QrCode => Watermark::QrCode(decode_text(data, &mut warnings)),
            PayloadType::Image => {
                let (image, bitmap_warnings) = decode_bitmap(&data)?;
                warnings.extend(bitmap_warnings);
                Watermark::Image(image)
            }
            PayloadType::Other(tag) => Watermark::Unknown { tag, data },
        };

        Ok((watermark, warnings))
    }
}

fn decode_text(data: Vec<u8>, warnings: &mut Vec<IntegrityWarning>) -> String {
    match String::from_utf8(data) {
        Ok(text) => text,
        Err(e) => {
            let warning = IntegrityWarning::InvalidText {
                valid_up_to: e.utf8_error().valid_up_to(),
            };
            warn!("{warning}");
            warnings.push(warning);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// Non fatal problem found while decoding an extracted payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// text or QR content is not valid UTF-8, invalid sequences were replaced
    InvalidText { valid_up_to: usize },
    /// bitmap payload shorter than its own 4 byte dimension header
    BitmapHeaderMissing { available: usize },
    /// bitmap declares more pixels than bytes are left, missing pixels are black
    BitmapTruncated { expected: usize, available: usize },
    /// truncated bitmap too large to fill, only the rows with data are kept
    BitmapCropped { declared_height: u32, height: u32 },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::InvalidText { valid_up_to } => write!(
                f,
                "text watermark is not valid UTF-8 after {valid_up_to} bytes, invalid bytes replaced"
            ),
            IntegrityWarning::BitmapHeaderMissing { available } => write!(
                f,
                "bitmap watermark too short for its header: {available} of 4 bytes"
            ),
            IntegrityWarning::BitmapTruncated {
                expected,
                available,
            } => write!(
                f,
                "bitmap watermark incomplete: {available} of {expected} pixel bytes, rest filled black"
            ),
            IntegrityWarning::BitmapCropped {
                declared_height,
                height,
            } => write!(
                f,
                "bitmap watermark declares {declared_height} rows but carries data for {height}, cropped"
            ),
        }
    }
}

/// Result of [`Watermarker::extract`](crate::Watermarker::extract)
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub watermark: Watermark,
    pub warnings: Vec<IntegrityWarning>,
}

impl Extracted {
    pub fn is_intact(&self) -> bool {
        self.warnings.is_empty()
    }
}
