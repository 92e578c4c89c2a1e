use std::path::{Path, PathBuf};

use log::info;

use crate::media::{open_image, save_image};
use crate::{Watermarker, WatermarkError, WatermarkOptions};

pub fn prepare() -> HideApi {
    HideApi::default()
}

/// What gets embedded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkSource {
    Text(String),
    QrCode(String),
    /// any PNG or JPEG, stored as black and white bitmap
    ImageFile(PathBuf),
}

#[derive(Default, Debug)]
pub struct HideApi {
    watermark: Option<WatermarkSource>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    options: WatermarkOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: WatermarkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.watermark = Some(WatermarkSource::Text(text.to_string()));
        self
    }

    pub fn with_qr_code(mut self, content: &str) -> Self {
        self.watermark = Some(WatermarkSource::QrCode(content.to_string()));
        self
    }

    pub fn with_watermark_image<A: AsRef<Path>>(mut self, watermark_image: A) -> Self {
        self.watermark = Some(WatermarkSource::ImageFile(
            watermark_image.as_ref().to_path_buf(),
        ));
        self
    }

    /// If `None` is passed, a watermark set before is kept
    pub fn use_watermark(mut self, watermark: Option<WatermarkSource>) -> Self {
        if watermark.is_some() {
            self.watermark = watermark;
        }
        self
    }

    /// The carrier image
    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn execute(self) -> Result<(), WatermarkError> {
        let Some(watermark) = self.watermark else {
            return Err(WatermarkError::MissingPayload);
        };
        let Some(image) = self.image else {
            return Err(WatermarkError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(WatermarkError::TargetNotSet);
        };

        let watermarker = Watermarker::new(self.options)?;
        let carrier = open_image(&image)?;
        info!(
            "carrier {image:?} can hold {} bits",
            watermarker.capacity(&carrier)
        );

        let watermarked = match watermark {
            WatermarkSource::Text(text) => watermarker.embed_text(&carrier, &text)?,
            WatermarkSource::QrCode(content) => watermarker.embed_qr_code(&carrier, &content)?,
            WatermarkSource::ImageFile(path) => {
                let watermark_image = open_image(&path)?;
                watermarker.embed_image(&carrier, &watermark_image)?
            }
        };

        save_image(&watermarked, &output, self.options.jpeg_quality())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_textured_image;
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        prepare_textured_image(256, 256)
            .save(&carrier)
            .expect("Failed to write carrier image");

        crate::api::hide::prepare()
            .with_text("Hello")
            .with_image(&carrier)
            .with_output(temp_dir.path().join("image-with-watermark.png"))
            .execute()
            .expect("Failed to hide text in image");

        assert!(temp_dir.path().join("image-with-watermark.png").exists());
    }

    #[test]
    fn should_complain_about_missing_parts() {
        assert!(matches!(
            prepare().with_image("a.png").with_output("b.png").execute(),
            Err(WatermarkError::MissingPayload)
        ));
        assert!(matches!(
            prepare().with_text("x").with_output("b.png").execute(),
            Err(WatermarkError::CarrierNotSet)
        ));
        assert!(matches!(
            prepare().with_text("x").with_image("a.png").execute(),
            Err(WatermarkError::TargetNotSet)
        ));
    }

    #[test]
    fn should_not_write_output_if_capacity_is_exceeded() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("small.png");
        let output = temp_dir.path().join("out.png");
        prepare_textured_image(64, 64)
            .save(&carrier)
            .expect("Failed to write carrier image");

        let result = prepare()
            .with_text("far too long for 16 bits")
            .with_image(&carrier)
            .with_output(&output)
            .execute();

        assert!(matches!(result, Err(WatermarkError::CapacityExceeded { .. })));
        assert!(!output.exists());
    }
}
