use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use log::error;

use crate::error::WatermarkError;
use crate::result::Result;

/// File formats a carrier can be read from and written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or(WatermarkError::UnsupportedMedia)?;

        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(WatermarkError::UnsupportedMedia),
        }
    }
}

pub fn open_image(path: &Path) -> Result<DynamicImage> {
    ImageFormat::from_path(path)?;

    image::open(path).map_err(|e| {
        error!("Error opening image {path:?}: {e}");
        WatermarkError::InvalidImageMedia
    })
}

/// Writes `image` to `path`, the extension decides the format.
///
/// JPEG drops the alpha channel and is encoded with `jpeg_quality`.
pub fn save_image(image: &RgbaImage, path: &Path, jpeg_quality: u8) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    let file = File::create(path).map_err(|e| {
        error!("Error creating file {path:?}: {e}");
        WatermarkError::WriteError { source: e }
    })?;
    let mut writer = BufWriter::new(file);

    write_image(image, &mut writer, format, jpeg_quality)?;
    writer
        .flush()
        .map_err(|source| WatermarkError::WriteError { source })
}

pub fn write_image<W: Write + Seek>(
    image: &RgbaImage,
    writer: &mut W,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<()> {
    let written = match format {
        ImageFormat::Png => image.write_to(writer, ImageOutputFormat::Png),
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .into_rgb8()
            .write_to(writer, ImageOutputFormat::Jpeg(jpeg_quality.clamp(1, 100))),
    };

    written.map_err(|e| {
        error!("Error encoding image: {e}");
        WatermarkError::ImageEncodingError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_textured_image;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn should_pick_the_format_from_the_extension() {
        assert_eq!(ImageFormat::from_path(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.jpeg")).unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            ImageFormat::from_path(Path::new("a.gif")),
            Err(WatermarkError::UnsupportedMedia)
        ));
        assert!(matches!(
            ImageFormat::from_path(Path::new("no-extension")),
            Err(WatermarkError::UnsupportedMedia)
        ));
    }

    #[test]
    fn should_store_png_losslessly() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("carrier.png");
        let img = prepare_textured_image(24, 16);

        save_image(&img, &path, 100).unwrap();
        let reopened = open_image(&path).unwrap().to_rgba8();

        assert_eq!(reopened, img);
    }

    #[test]
    fn should_encode_jpeg_without_alpha() {
        let img = prepare_textured_image(16, 16);
        let mut buffer = Cursor::new(Vec::new());

        write_image(&img, &mut buffer, ImageFormat::Jpeg, 90).unwrap();
        let decoded = image::load_from_memory(buffer.get_ref()).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (16, 16));
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn should_report_broken_images() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        assert!(matches!(
            open_image(&path),
            Err(WatermarkError::InvalidImageMedia)
        ));
    }
}
