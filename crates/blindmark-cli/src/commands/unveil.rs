use std::path::{Path, PathBuf};

use blindmark_core::{Watermark, WatermarkError, WatermarkOptions};
use clap::Args;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use log::{error, info, warn};
use qrcode::{types::Color, EcLevel, QrCode};

use crate::CliResult;

/// File the regenerated QR code is written to.
pub const QR_CODE_FILE_NAME: &str = "qr-code.png";

/// Edge length of the regenerated QR code in pixels.
const QR_CODE_SIZE: u32 = 256;

const QUIET_ZONE_MODULES: u32 = 4;

/// Unveils a watermark from PNG or JPEG images
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source image that contains a watermark
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Final data will be stored in that folder
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output folder",
        required = true
    )]
    pub output_folder: PathBuf,
}

impl UnveilArgs {
    pub fn run(self, options: WatermarkOptions) -> CliResult<()> {
        let extracted =
            blindmark_core::commands::unveil(&self.media, &self.output_folder, options)?;
        for warning in &extracted.warnings {
            warn!("{warning}");
        }

        match &extracted.watermark {
            Watermark::Text(text) => println!("{text}"),
            Watermark::QrCode(content) => {
                println!("{content}");
                save_qr_code(content, &self.output_folder.join(QR_CODE_FILE_NAME))?;
            }
            Watermark::Image(bitmap) => {
                info!("bitmap watermark of {}x{}", bitmap.width(), bitmap.height())
            }
            Watermark::Unknown { tag, data } => {
                info!("unknown payload 0x{tag:02x} of {} bytes", data.len())
            }
        }

        Ok(())
    }
}

/// Renders `content` as QR code with medium error correction.
fn render_qr_code(content: &str) -> CliResult<GrayImage> {
    let qr = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M).map_err(|e| {
        error!("Error encoding qr code: {e}");
        WatermarkError::ImageEncodingError
    })?;

    let width = qr.width() as u32;
    let modules = width + QUIET_ZONE_MODULES * 2;
    let module_px = (QR_CODE_SIZE / modules).max(1);
    let mut img = GrayImage::from_pixel(modules * module_px, modules * module_px, Luma([255]));

    for y in 0..width {
        for x in 0..width {
            if qr[(x as usize, y as usize)] == Color::Dark {
                let x0 = (x + QUIET_ZONE_MODULES) * module_px;
                let y0 = (y + QUIET_ZONE_MODULES) * module_px;
                for yy in 0..module_px {
                    for xx in 0..module_px {
                        img.put_pixel(x0 + xx, y0 + yy, Luma([0]));
                    }
                }
            }
        }
    }

    Ok(imageops::resize(&img, QR_CODE_SIZE, QR_CODE_SIZE, FilterType::Nearest))
}

fn save_qr_code(content: &str, file: &Path) -> CliResult<()> {
    render_qr_code(content)?.save(file).map_err(|e| {
        error!("Error saving qr code {file:?}: {e}");
        WatermarkError::ImageEncodingError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn should_render_a_256px_qr_code_with_quiet_zone() {
        let img = render_qr_code("https://example.org").unwrap();

        assert_eq!(img.dimensions(), (QR_CODE_SIZE, QR_CODE_SIZE));
        assert_eq!(img.get_pixel(0, 0), &Luma([255]));
        assert!(img.pixels().any(|p| p.0[0] == 0));
    }

    #[test]
    fn should_write_the_qr_code_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join(QR_CODE_FILE_NAME);

        save_qr_code("hello", &file).unwrap();

        let reopened = image::open(&file).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (256, 256));
    }
}
