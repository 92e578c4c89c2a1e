use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatermarkError {
    /// Represents a payload that needs more bits than the carrier sub-band offers.
    #[error("Capacity Error: the image can hold {available} bits, but {required} bits are required")]
    CapacityExceeded { required: usize, available: usize },

    /// Represents a bitmap watermark whose dimensions do not fit the 2 byte width/height header
    #[error("Watermark image of {width}x{height} exceeds the maximum of 65535 pixels per axis")]
    BitmapTooLarge { width: u32, height: u32 },

    /// Represents a payload whose length does not fit the 4 byte length header
    #[error("Payload of {len} bytes exceeds the maximum frame length")]
    PayloadTooLarge { len: usize },

    /// Represents a non positive or non finite watermark strength
    #[error("Watermark strength must be a positive number, got {0}")]
    InvalidStrength(f64),

    /// Represents extracted data that is too short to even hold a frame header
    #[error("Extracted data too short: {available} bytes available, at least 5 required")]
    FrameTooShort { available: usize },

    /// Represents a frame whose declared length exceeds the extracted data
    #[error("Extracted data corrupted or incomplete: frame declares {declared} bytes, {available} available")]
    FrameLengthMismatch { declared: usize, available: usize },

    /// Represents an unsupported carrier media. For example, a GIF or a movie file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing watermark payload")]
    MissingPayload,
}

impl WatermarkError {
    /// Errors detected before anything was embedded, no output was produced.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            WatermarkError::CapacityExceeded { .. }
                | WatermarkError::BitmapTooLarge { .. }
                | WatermarkError::PayloadTooLarge { .. }
                | WatermarkError::InvalidStrength(_)
        )
    }

    /// Errors caused by truncated or corrupted data after extraction.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            WatermarkError::FrameTooShort { .. } | WatermarkError::FrameLengthMismatch { .. }
        )
    }
}
