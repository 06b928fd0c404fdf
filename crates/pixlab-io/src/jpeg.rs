//! JPEG image format support
//!
//! Reads JPEG images with the `jpeg-decoder` crate and writes baseline
//! JPEG with the `jpeg-encoder` crate. Grayscale and RGB are supported.

use crate::convert::{from_interleaved_u8, to_interleaved_u8};
use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use pixlab_core::Image;
use std::io::{Read, Write};

/// Default encoder quality
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// Returns a 1-channel image for grayscale input and a 3-channel image
/// for color input.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG info unavailable".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    match info.pixel_format {
        PixelFormat::L8 => from_interleaved_u8(width, height, 1, &pixels),
        PixelFormat::RGB24 => from_interleaved_u8(width, height, 3, &pixels),
        PixelFormat::L16 => {
            // Big-endian 16-bit luma; keep the high byte
            let high: Vec<u8> = pixels.iter().step_by(2).copied().collect();
            from_interleaved_u8(width, height, 1, &high)
        }
        PixelFormat::CMYK32 => Err(IoError::UnsupportedFormat(
            "CMYK JPEG is not supported".to_string(),
        )),
    }
}

/// Write a JPEG image to a writer at [`DEFAULT_QUALITY`].
pub fn write_jpeg<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    write_jpeg_with_quality(image, writer, DEFAULT_QUALITY)
}

/// Write a JPEG image to a writer.
///
/// # Arguments
/// * `image` - 1-channel (grayscale) or 3-channel (RGB) image
/// * `writer` - Destination writer
/// * `quality` - Encoder quality, 1..=100
pub fn write_jpeg_with_quality<W: Write>(image: &Image, mut writer: W, quality: u8) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => jpeg_encoder::ColorType::Luma,
        3 => jpeg_encoder::ColorType::Rgb,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG cannot store {} channels",
                n
            )));
        }
    };

    let (width, height) = image.dimensions();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::InvalidData(format!(
            "{}x{} exceeds JPEG dimension limit",
            width, height
        )));
    }

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, quality.clamp(1, 100));
    encoder
        .encode(
            &to_interleaved_u8(image),
            width as u16,
            height as u16,
            color_type,
        )
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    writer.write_all(&jpeg_buf)?;
    Ok(())
}
