use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use log::{info, warn};

use super::{IMAGE_FILE_NAME, QR_CONTENT_FILE_NAME, TEXT_FILE_NAME};
use crate::media::{open_image, save_image};
use crate::{Extracted, Watermark, Watermarker, WatermarkError, WatermarkOptions};

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    watermarked_image: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    options: WatermarkOptions,
}

impl UnveilApi {
    /// Use the given options, they must match the ones used for hiding
    pub fn with_options(mut self, options: WatermarkOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the image that carries the watermark
    pub fn from_watermarked_image(mut self, image: impl AsRef<Path>) -> Self {
        self.watermarked_image = Some(image.as_ref().to_path_buf());
        self
    }

    /// This is the folder where the watermark will be saved to
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process, writes one file into the output folder
    /// and returns what was found.
    pub fn execute(self) -> Result<Extracted, WatermarkError> {
        let Some(watermarked_image) = self.watermarked_image else {
            return Err(WatermarkError::CarrierNotSet);
        };
        let Some(output_folder) = self.output_folder else {
            return Err(WatermarkError::TargetNotSet);
        };

        let watermarker = Watermarker::new(self.options)?;
        let image = open_image(&watermarked_image)?;
        let extracted = watermarker.extract(&image)?;

        match &extracted.watermark {
            Watermark::Text(text) => {
                write_file(&output_folder.join(TEXT_FILE_NAME), text.as_bytes())?
            }
            Watermark::QrCode(content) => {
                write_file(&output_folder.join(QR_CONTENT_FILE_NAME), content.as_bytes())?
            }
            Watermark::Image(bitmap) if bitmap.width() == 0 || bitmap.height() == 0 => {
                warn!("bitmap watermark has no pixels, nothing written");
            }
            Watermark::Image(bitmap) => {
                let rgba = DynamicImage::ImageLuma8(bitmap.clone()).into_rgba8();
                save_image(&rgba, &output_folder.join(IMAGE_FILE_NAME), 100)?
            }
            Watermark::Unknown { tag, data } => {
                let file_name = format!("watermark-{tag:02x}.bin");
                info!("unknown payload type 0x{tag:02x}, written as {file_name}");
                write_file(&output_folder.join(file_name), data)?
            }
        }

        Ok(extracted)
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), WatermarkError> {
    let mut target_file =
        File::create(path).map_err(|source| WatermarkError::WriteError { source })?;

    target_file
        .write_all(content)
        .map_err(|source| WatermarkError::WriteError { source })
}

#[cfg(test)]
mod tests {
    use std::io::read_to_string;

    use super::*;
    use crate::test_utils::prepare_textured_image;
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        let watermarked = temp_dir.path().join("watermarked.png");
        prepare_textured_image(256, 256)
            .save(&carrier)
            .expect("Failed to write carrier image");
        crate::api::hide::prepare()
            .with_text("Hello World")
            .with_image(&carrier)
            .with_output(&watermarked)
            .execute()
            .expect("Failed to hide text in image");

        let output = temp_dir.path().join("unveiled");
        std::fs::create_dir(&output).expect("Failed to create output folder");
        let extracted = crate::api::unveil::prepare()
            .from_watermarked_image(&watermarked)
            .into_output_folder(&output)
            .execute()
            .expect("Failed to unveil watermark from image");

        assert_eq!(extracted.watermark, Watermark::Text("Hello World".to_string()));
        assert_eq!(output.read_dir().unwrap().count(), 1);
        let text = read_to_string(
            File::open(output.join(TEXT_FILE_NAME)).expect("Failed to open file"),
        )
        .expect("Failed to read file");
        assert_eq!(text, "Hello World");
    }

    #[test]
    fn should_require_image_and_folder() {
        assert!(matches!(
            prepare().into_output_folder(".").execute(),
            Err(WatermarkError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().from_watermarked_image("a.png").execute(),
            Err(WatermarkError::TargetNotSet)
        ));
    }
}
