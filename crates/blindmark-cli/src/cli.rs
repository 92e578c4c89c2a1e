use clap::{Parser, Subcommand, ValueEnum};

use blindmark_core::options::{DEFAULT_BITMAP_THRESHOLD, DEFAULT_JPEG_QUALITY, DEFAULT_STRENGTH};
use blindmark_core::{BitmapOptions, EngineOptions, Subband, WatermarkOptions};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Minimum separation of the coefficient pair, higher survives more but shows more
    #[arg(long, global = true, default_value_t = DEFAULT_STRENGTH)]
    pub strength: f64,

    /// Embed after a Haar wavelet or tile the luminance directly
    #[arg(long, global = true, value_enum, default_value_t = Transform::Wavelet)]
    pub transform: Transform,

    /// Wavelet sub-band that carries the bits
    #[arg(long, global = true, value_enum, default_value_t = Band::Hl)]
    pub subband: Band,

    /// Luminance above which a watermark image pixel counts as white
    #[arg(long, global = true, default_value_t = DEFAULT_BITMAP_THRESHOLD)]
    pub threshold: u8,

    /// Quality (1-100) used when the output image is a JPEG
    #[arg(long = "jpeg-quality", global = true, default_value_t = DEFAULT_JPEG_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    UnveilRaw(unveil_raw::UnveilRawArgs),
    Capacity(capacity::CapacityArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    Wavelet,
    Direct,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Ll,
    Hl,
    Lh,
    Hh,
}

impl From<Band> for Subband {
    fn from(band: Band) -> Self {
        match band {
            Band::Ll => Subband::LowLow,
            Band::Hl => Subband::HighLow,
            Band::Lh => Subband::LowHigh,
            Band::Hh => Subband::HighHigh,
        }
    }
}

impl CliArgs {
    pub fn options(&self) -> WatermarkOptions {
        let engine = match self.transform {
            Transform::Wavelet => EngineOptions::wavelet(self.subband.into()),
            Transform::Direct => EngineOptions::direct(),
        }
        .with_strength(self.strength);

        WatermarkOptions::default()
            .with_engine(engine)
            .with_bitmap(BitmapOptions {
                threshold: self.threshold,
                ..BitmapOptions::default()
            })
            .with_jpeg_quality(self.jpeg_quality)
    }
}
