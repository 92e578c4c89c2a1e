use std::path::PathBuf;

use blindmark_core::WatermarkOptions;
use clap::Args;

use crate::CliResult;

/// Shows how much a carrier image can hold
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image such as PNG or JPEG file
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,
}

impl CapacityArgs {
    pub fn run(self, options: WatermarkOptions) -> CliResult<()> {
        let capacity = blindmark_core::commands::capacity(&self.media, options)?;

        println!(
            "{}x{}: {} bits, up to {} bytes of text",
            capacity.width, capacity.height, capacity.bits, capacity.payload_bytes
        );

        Ok(())
    }
}
