//! Framing of typed payloads into the flat bit sequence carried by the engine.
//!
//! A frame is `[type: u8][length: u32 BE][payload]`, serialized MSB-first.
//! Extraction always yields one bit per block of the sub-band, so the bit
//! sequence handed to [`unpack`] is usually longer than the frame; the length
//! header is what tells the real payload apart from the trailing noise.

use std::fmt;
use std::io::Cursor;

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::WatermarkError;
use crate::result::Result;

/// Size of the type tag plus the length field.
pub const FRAME_HEADER_LEN: usize = 5;

pub(crate) const TEXT: u8 = 0x01;
pub(crate) const IMAGE: u8 = 0x02;
pub(crate) const QR_CODE: u8 = 0x03;

#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum PayloadType {
    Text,
    Image,
    QrCode,
    /// a tag that is not known, kept as read from the frame
    Other(u8),
}

impl From<PayloadType> for u8 {
    fn from(value: PayloadType) -> Self {
        match value {
            PayloadType::Text => TEXT,
            PayloadType::Image => IMAGE,
            PayloadType::QrCode => QR_CODE,
            PayloadType::Other(other) => other,
        }
    }
}

impl From<u8> for PayloadType {
    fn from(value: u8) -> Self {
        match value {
            TEXT => PayloadType::Text,
            IMAGE => PayloadType::Image,
            QR_CODE => PayloadType::QrCode,
            other => PayloadType::Other(other),
        }
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadType::Text => write!(f, "text"),
            PayloadType::Image => write!(f, "image"),
            PayloadType::QrCode => write!(f, "qr code"),
            PayloadType::Other(tag) => write!(f, "unknown (0x{tag:02x})"),
        }
    }
}

/// A typed, length prefixed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub payload_type: PayloadType,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new<D: Into<Vec<u8>>>(payload_type: PayloadType, data: D) -> Self {
        Self {
            payload_type,
            data: data.into(),
        }
    }

    /// Number of bits a frame around `payload_len` bytes occupies.
    pub fn bit_len(payload_len: usize) -> usize {
        (FRAME_HEADER_LEN + payload_len) * 8
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let len = u32::try_from(self.data.len()).map_err(|_| WatermarkError::PayloadTooLarge {
            len: self.data.len(),
        })?;

        let mut buffer = Vec::with_capacity(FRAME_HEADER_LEN + self.data.len());
        buffer.write_u8(self.payload_type.into())?;
        buffer.write_u32::<BigEndian>(len)?;
        buffer.extend_from_slice(&self.data);

        Ok(buffer)
    }

    /// Parses a frame, any bytes behind the declared length are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < FRAME_HEADER_LEN {
            return Err(WatermarkError::FrameTooShort {
                available: bytes.len(),
            });
        }

        let mut header = Cursor::new(&bytes[..FRAME_HEADER_LEN]);
        let payload_type = PayloadType::from(header.read_u8()?);
        let declared = header.read_u32::<BigEndian>()? as usize;

        let body = &bytes[FRAME_HEADER_LEN..];
        if declared > body.len() {
            return Err(WatermarkError::FrameLengthMismatch {
                declared,
                available: body.len(),
            });
        }

        Ok(Self::new(payload_type, &body[..declared]))
    }

    pub fn to_bits(&self) -> Result<Vec<bool>> {
        Ok(bytes_to_bits(&self.to_bytes()?))
    }

    pub fn from_bits(bits: &[bool]) -> Result<Self> {
        Self::from_bytes(&bits_to_bytes(bits)?)
    }
}

/// Frames `data` and serializes it into `8 * (5 + data.len())` bits.
pub fn pack(payload_type: PayloadType, data: &[u8]) -> Result<Vec<bool>> {
    Frame::new(payload_type, data).to_bits()
}

/// Reverses [`pack`], tolerating trailing bits and a trailing partial byte.
pub fn unpack(bits: &[bool]) -> Result<(PayloadType, Vec<u8>)> {
    let frame = Frame::from_bits(bits)?;

    Ok((frame.payload_type, frame.data))
}

/// MSB first, exactly 8 bits per byte.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut reader = BitReader::endian(bytes, bitstream_io::BigEndian);

    std::iter::from_fn(|| reader.read_bit().ok()).collect()
}

/// MSB first, a trailing partial byte is dropped.
pub fn bits_to_bytes(bits: &[bool]) -> Result<Vec<u8>> {
    let whole = bits.len() - bits.len() % 8;
    let mut writer = BitWriter::endian(Vec::with_capacity(whole / 8), bitstream_io::BigEndian);
    for bit in &bits[..whole] {
        writer.write_bit(*bit)?;
    }

    Ok(writer.into_writer())
}
