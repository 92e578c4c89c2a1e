pub mod hide;
pub mod unveil;
pub mod unveil_raw;

/// Name of the file a text watermark is unveiled into.
pub const TEXT_FILE_NAME: &str = "watermark.txt";
/// Name of the file a bitmap watermark is unveiled into.
pub const IMAGE_FILE_NAME: &str = "watermark.png";
/// Name of the file the content of a QR code watermark is unveiled into.
pub const QR_CONTENT_FILE_NAME: &str = "qr-content.txt";
