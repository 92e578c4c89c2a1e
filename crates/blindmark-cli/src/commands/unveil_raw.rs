use std::path::PathBuf;

use blindmark_core::WatermarkOptions;
use clap::Args;

/// Unveils the raw bits of an image, frame header included
#[derive(Args, Debug)]
pub struct UnveilRawArgs {
    /// Source image that contains a watermark
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Raw data will be stored as binary file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output_file: PathBuf,
}

impl UnveilRawArgs {
    pub fn run(self, options: WatermarkOptions) -> crate::CliResult<()> {
        blindmark_core::api::unveil_raw::prepare()
            .with_options(options)
            .from_watermarked_image(self.media)
            .into_raw_file(self.output_file)
            .execute()
    }
}
