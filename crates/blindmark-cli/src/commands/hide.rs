use std::path::PathBuf;

use blindmark_core::api::hide::WatermarkSource;
use blindmark_core::WatermarkOptions;
use clap::{ArgGroup, Args};

use crate::CliResult;

/// Hides a watermark in PNG or JPEG images
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("watermark").required(true).args(["message", "qr_code", "watermark_image"])))]
pub struct HideArgs {
    /// Carrier image such as PNG or JPEG file, used readonly.
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Final image will be stored as file, .png or .jpg
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output image file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// Content of a QR code, only the content is stored
    #[arg(short, long = "qr", value_name = "qr content")]
    pub qr_code: Option<String>,

    /// Image that will be hidden as black and white bitmap
    #[arg(short = 'w', long = "watermark", value_name = "watermark image")]
    pub watermark_image: Option<PathBuf>,
}

impl HideArgs {
    pub fn run(self, options: WatermarkOptions) -> CliResult<()> {
        let watermark = if let Some(message) = self.message {
            WatermarkSource::Text(message)
        } else if let Some(content) = self.qr_code {
            WatermarkSource::QrCode(content)
        } else if let Some(path) = self.watermark_image {
            WatermarkSource::ImageFile(path)
        } else {
            return Err(blindmark_core::WatermarkError::MissingPayload);
        };

        blindmark_core::commands::hide(&self.media, &self.write_to_file, watermark, options)
    }
}
