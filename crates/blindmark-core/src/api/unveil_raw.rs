use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::media::open_image;
use crate::{Watermarker, WatermarkError, WatermarkOptions};

pub fn prepare() -> UnveilRawApi {
    UnveilRawApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilRawApi {
    watermarked_image: Option<PathBuf>,
    destination_file: Option<PathBuf>,
    options: WatermarkOptions,
}

impl UnveilRawApi {
    pub fn with_options(mut self, options: WatermarkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn from_watermarked_image(mut self, image: impl AsRef<Path>) -> Self {
        self.watermarked_image = Some(image.as_ref().to_path_buf());
        self
    }

    /// This is the raw file where all data will be saved to
    pub fn into_raw_file(mut self, destination_file: impl AsRef<Path>) -> Self {
        self.destination_file = Some(destination_file.as_ref().to_path_buf());
        self
    }

    /// Dumps one byte per 8 blocks of the sub-band, no unframing happens.
    pub fn execute(self) -> Result<(), WatermarkError> {
        let Some(watermarked_image) = self.watermarked_image else {
            return Err(WatermarkError::CarrierNotSet);
        };
        let Some(destination_file) = self.destination_file else {
            return Err(WatermarkError::TargetNotSet);
        };

        let watermarker = Watermarker::new(self.options)?;
        let image = open_image(&watermarked_image)?;
        let bytes = watermarker.extract_bytes(&image)?;

        let mut destination_file =
            File::create(destination_file).map_err(|source| WatermarkError::WriteError { source })?;
        destination_file
            .write_all(&bytes)
            .map_err(|source| WatermarkError::WriteError { source })
    }
}
