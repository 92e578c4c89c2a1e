use image::{GenericImageView, Pixel, Rgba, RgbaImage};

use crate::transform::Matrix;

/// ITU-R BT.601 luma of an 8 bit rgb triple.
#[inline]
pub fn luma(rgba: &Rgba<u8>) -> f64 {
    let [r, g, b, _] = rgba.0;
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Luminance of the top left `width` x `height` pixels of `image`.
pub fn luminance<I>(image: &I, width: usize, height: usize) -> Matrix
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    Matrix::from_fn(width, height, |x, y| {
        luma(&image.get_pixel(x as u32, y as u32).to_rgba())
    })
}

/// Builds a new image from `image` where every pixel carries the luminance
/// change between `original` and `modified`.
///
/// The delta is added to all three color channels alike, which keeps the
/// chrominance of the pixel. Alpha is always opaque.
pub fn apply_luminance_delta<I>(image: &I, original: &Matrix, modified: &Matrix) -> RgbaImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    RgbaImage::from_fn(original.width() as u32, original.height() as u32, |x, y| {
        let (col, row) = (x as usize, y as usize);
        let delta = modified.get(col, row) - original.get(col, row);
        let [r, g, b, _] = image.get_pixel(x, y).to_rgba().0;

        Rgba([shift(r, delta), shift(g, delta), shift(b, delta), u8::MAX])
    })
}

#[inline]
fn shift(channel: u8, delta: f64) -> u8 {
    (channel as f64 + delta).round().clamp(0.0, 255.0) as u8
}
