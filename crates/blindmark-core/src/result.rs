use crate::error::WatermarkError;

pub type Result<T> = std::result::Result<T, WatermarkError>;
