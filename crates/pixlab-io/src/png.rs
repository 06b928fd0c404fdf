//! PNG image format support

use crate::convert::{from_interleaved_u8, to_interleaved_u8};
use crate::{IoError, IoResult};
use pixlab_core::Image;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Palette and low-bit-depth images are expanded to 8 bits. 16-bit
/// samples keep their high byte. The result has 1 (gray), 2 (gray+alpha),
/// 3 (RGB) or 4 (RGBA) channels.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let channels: u32 = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG output color type after expansion: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let row_samples = (width * channels) as usize;
    let mut packed = Vec::with_capacity(row_samples * height as usize);

    for y in 0..height as usize {
        let row = &buf[y * bytes_per_row..];
        match bit_depth {
            BitDepth::Eight => packed.extend_from_slice(&row[..row_samples]),
            BitDepth::Sixteen => packed.extend(row[..row_samples * 2].iter().step_by(2)),
            other => {
                return Err(IoError::UnsupportedFormat(format!(
                    "unexpected PNG output depth after expansion: {:?}",
                    other
                )));
            }
        }
    }

    from_interleaved_u8(width, height, channels, &packed)
}

/// Write a PNG image
///
/// Accepts 1, 2, 3 or 4 channel images; samples are clamped to [0, 1]
/// and written at 8 bits.
pub fn write_png<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    let color_type = match image.channels() {
        1 => ColorType::Grayscale,
        2 => ColorType::GrayscaleAlpha,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNG cannot store {} channels",
                n
            )));
        }
    };

    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(&to_interleaved_u8(image))
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_grayscale_levels() {
        let mut im = Image::new(10, 10, 1).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                im.set(x, y, 0, ((x + y) * 10) as f32 / 255.0);
            }
        }

        let mut buffer = Vec::new();
        write_png(&im, &mut buffer).unwrap();
        let im2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(im2.shape(), im.shape());
        assert!(im.max_abs_diff(&im2).unwrap() < 1e-6);
    }

    #[test]
    fn test_png_rgb_channels() {
        let mut im = Image::new(5, 5, 3).unwrap();
        im.set(0, 0, 0, 1.0);
        im.set(1, 1, 1, 1.0);
        im.set(2, 2, 2, 1.0);

        let mut buffer = Vec::new();
        write_png(&im, &mut buffer).unwrap();
        let im2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(im2.channels(), 3);
        assert_eq!(im2.get(0, 0, 0), 1.0);
        assert_eq!(im2.get(1, 1, 1), 1.0);
        assert_eq!(im2.get(2, 2, 2), 1.0);
        assert_eq!(im2.get(2, 2, 0), 0.0);
    }

    #[test]
    fn test_png_rejects_five_channels() {
        let im = Image::new(2, 2, 5).unwrap();
        assert!(write_png(&im, Vec::new()).is_err());
    }
}
