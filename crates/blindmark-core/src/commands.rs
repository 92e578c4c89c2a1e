use std::path::Path;

use crate::api::hide::WatermarkSource;
use crate::media::open_image;
use crate::{Extracted, Watermarker, WatermarkError, WatermarkOptions};

pub fn hide(
    media: &Path,
    write_to_file: &Path,
    watermark: WatermarkSource,
    options: WatermarkOptions,
) -> Result<(), WatermarkError> {
    crate::api::hide::prepare()
        .with_options(options)
        .with_image(media)
        .with_output(write_to_file)
        .use_watermark(Some(watermark))
        .execute()
}

pub fn unveil(
    watermarked_media: &Path,
    output_folder: &Path,
    options: WatermarkOptions,
) -> Result<Extracted, WatermarkError> {
    crate::api::unveil::prepare()
        .with_options(options)
        .from_watermarked_image(watermarked_media)
        .into_output_folder(output_folder)
        .execute()
}

/// unveil all raw data, no content format interpretation is happening.
/// Just a raw binary dump of the bits read from the sub-band.
pub fn unveil_raw(
    watermarked_media: &Path,
    destination_file: &Path,
    options: WatermarkOptions,
) -> Result<(), WatermarkError> {
    crate::api::unveil_raw::prepare()
        .with_options(options)
        .from_watermarked_image(watermarked_media)
        .into_raw_file(destination_file)
        .execute()
}

/// What a carrier image can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub width: u32,
    pub height: u32,
    /// bits, frame header included
    pub bits: usize,
    /// largest payload in bytes
    pub payload_bytes: usize,
}

pub fn capacity(media: &Path, options: WatermarkOptions) -> Result<Capacity, WatermarkError> {
    let watermarker = Watermarker::new(options)?;
    let image = open_image(media)?;
    let (width, height) = (image.width(), image.height());

    Ok(Capacity {
        width,
        height,
        bits: watermarker.capacity_bits(width, height),
        payload_bytes: watermarker.payload_capacity(width, height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_textured_image;
    use crate::EngineOptions;
    use tempfile::tempdir;

    #[test]
    fn should_report_capacity_of_a_carrier_file() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier = temp_dir.path().join("carrier.png");
        prepare_textured_image(256, 128)
            .save(&carrier)
            .expect("Failed to write carrier image");

        let wavelet = capacity(&carrier, WatermarkOptions::default()).unwrap();
        assert_eq!(
            wavelet,
            Capacity {
                width: 256,
                height: 128,
                bits: 128,
                payload_bytes: 11,
            }
        );

        let direct = WatermarkOptions::default().with_engine(EngineOptions::direct());
        assert_eq!(capacity(&carrier, direct).unwrap().bits, 512);
    }
}
