//! Black and white bitmap watermarks.
//!
//! The payload of a [`PayloadType::Image`](crate::PayloadType::Image) frame is
//! `[width: u16 BE][height: u16 BE]` followed by one bit per pixel, rows top
//! to bottom, MSB first, `1` for white.

use std::io::Cursor;

use bitstream_io::{BitWrite, BitWriter};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use image::imageops::{self, FilterType};
use image::{GenericImageView, GrayImage, Luma, Pixel};
use log::{info, warn};

use super::IntegrityWarning;
use crate::engine::luma;
use crate::error::WatermarkError;
use crate::protocol::Frame;
use crate::result::Result;

pub const BITMAP_HEADER_LEN: usize = 4;
pub const MAX_BITMAP_DIMENSION: u32 = u16::MAX as u32;

/// Largest truncated bitmap that is still filled up to its declared size.
pub const MAX_FILLED_PIXELS: usize = 1 << 24;

const BLACK: Luma<u8> = Luma([0]);
const WHITE: Luma<u8> = Luma([u8::MAX]);

/// Converts any image to 8 bit gray using the same luma weights as the engine.
pub fn to_grayscale<I>(image: &I) -> GrayImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        Luma([luma(&image.get_pixel(x, y).to_rgba()).round() as u8])
    })
}

/// Bytes needed for the packed pixels of a `width` x `height` bitmap.
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize + 7) / 8
}

/// Bits a framed bitmap of the given dimensions occupies.
pub fn framed_bit_len(width: u32, height: u32) -> usize {
    Frame::bit_len(BITMAP_HEADER_LEN + packed_len(width, height))
}

/// Shrinks `bitmap` until its frame fits into `capacity` bits.
///
/// The aspect ratio is kept as far as whole pixels allow, resampling is
/// Catmull-Rom. A bitmap that already fits is returned unchanged.
pub fn fit_bitmap(bitmap: GrayImage, capacity: usize) -> Result<GrayImage> {
    let (width, height) = bitmap.dimensions();
    if framed_bit_len(width, height) <= capacity {
        return Ok(bitmap);
    }

    let smallest = framed_bit_len(1, 1);
    if capacity < smallest {
        return Err(WatermarkError::CapacityExceeded {
            required: smallest,
            available: capacity,
        });
    }

    let pixel_budget = (capacity - Frame::bit_len(BITMAP_HEADER_LEN)) / 8 * 8;
    let ratio = (pixel_budget as f64 / (width as f64 * height as f64)).sqrt();
    let mut new_width = ((width as f64 * ratio) as u32).max(1);
    let mut new_height = ((height as f64 * ratio) as u32).max(1);
    while framed_bit_len(new_width, new_height) > capacity {
        if new_width >= new_height {
            new_width -= 1;
        } else {
            new_height -= 1;
        }
    }

    info!(
        "watermark of {width}x{height} pixels exceeds the capacity of {capacity} bits, scaled down to {new_width}x{new_height}"
    );

    Ok(imageops::resize(
        &bitmap,
        new_width,
        new_height,
        FilterType::CatmullRom,
    ))
}

/// Packs `bitmap` into the payload convention, pixels brighter than
/// `threshold` become white.
pub fn encode_bitmap(bitmap: &GrayImage, threshold: u8) -> Result<Vec<u8>> {
    let (width, height) = bitmap.dimensions();
    if width > MAX_BITMAP_DIMENSION || height > MAX_BITMAP_DIMENSION {
        return Err(WatermarkError::BitmapTooLarge { width, height });
    }

    let mut buffer = Vec::with_capacity(BITMAP_HEADER_LEN + packed_len(width, height));
    buffer.write_u16::<BigEndian>(width as u16)?;
    buffer.write_u16::<BigEndian>(height as u16)?;
    {
        let mut pixels = BitWriter::endian(&mut buffer, bitstream_io::BigEndian);
        for pixel in bitmap.pixels() {
            pixels.write_bit(pixel.0[0] > threshold)?;
        }
        pixels.byte_align()?;
    }

    Ok(buffer)
}

/// Rebuilds a bitmap from the payload convention.
///
/// Missing pixel data is not an error, the affected pixels turn black and a
/// warning is reported instead. A truncated bitmap declaring more than
/// [`MAX_FILLED_PIXELS`] is cropped to the rows its data reaches.
pub fn decode_bitmap(data: &[u8]) -> Result<(GrayImage, Vec<IntegrityWarning>)> {
    if data.len() < BITMAP_HEADER_LEN {
        let warning = IntegrityWarning::BitmapHeaderMissing {
            available: data.len(),
        };
        warn!("{warning}");
        return Ok((GrayImage::new(0, 0), vec![warning]));
    }

    let mut header = Cursor::new(&data[..BITMAP_HEADER_LEN]);
    let width = header.read_u16::<BigEndian>()? as u32;
    let height = header.read_u16::<BigEndian>()? as u32;
    let pixels = &data[BITMAP_HEADER_LEN..];

    let mut warnings = Vec::new();
    let expected = packed_len(width, height);
    if pixels.len() < expected {
        let warning = IntegrityWarning::BitmapTruncated {
            expected,
            available: pixels.len(),
        };
        warn!("{warning}");
        warnings.push(warning);
    }

    let mut height = height;
    if pixels.len() < expected && width as usize * height as usize > MAX_FILLED_PIXELS {
        let rows = (pixels.len() * 8).div_ceil(width as usize).clamp(1, height as usize) as u32;
        let warning = IntegrityWarning::BitmapCropped {
            declared_height: height,
            height: rows,
        };
        warn!("{warning}");
        warnings.push(warning);
        height = rows;
    }

    let bitmap = GrayImage::from_fn(width, height, |x, y| {
        let index = y as usize * width as usize + x as usize;
        match pixels.get(index / 8) {
            Some(byte) if (byte >> (7 - index % 8)) & 1 == 1 => WHITE,
            _ => BLACK,
        }
    });

    Ok((bitmap, warnings))
}
