//! Serialization for Image
//!
//! Mixed text header + binary data format.
//!
//! ```text
//! \nImage Version 1\n
//! w = W, h = H, c = C, nbytes = N\n
//! <raw f32 data, planar, little-endian, N bytes>
//! \n
//! ```

use super::{Image, Shape};
use crate::error::{Error, Result};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Serialized format version
const IMAGE_VERSION: i32 = 1;

/// Maximum sample count accepted when reading (2^29)
const MAX_SAMPLES: u64 = 1 << 29;

/// Maximum input size in bytes.
const MAX_INPUT_SIZE: u64 = 2_200_000_000;

impl Image {
    /// Read an image from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_INPUT_SIZE {
            return Err(Error::DecodeError(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read an image from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read an image from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let (shape, nbytes, header_end) = parse_header(data)?;

        let nsamples = shape
            .checked_sample_count()
            .map_or(u64::MAX, |n| n as u64);
        if nsamples > MAX_SAMPLES {
            return Err(Error::DecodeError(format!(
                "image too large: {nsamples} samples exceeds maximum {MAX_SAMPLES}"
            )));
        }
        let expected_nbytes = nsamples * 4;
        if nbytes != expected_nbytes {
            return Err(Error::DecodeError(format!(
                "nbytes mismatch: header says {nbytes} but w*h*c*4 = {expected_nbytes}"
            )));
        }

        let binary_end = header_end + nbytes as usize;
        if data.len() < binary_end {
            return Err(Error::DecodeError(format!(
                "image data truncated: need {binary_end} bytes but only have {}",
                data.len()
            )));
        }

        let samples: Vec<f32> = data[header_end..binary_end]
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        Image::from_data(shape.width, shape.height, shape.channels, samples)
    }

    /// Write an image to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        let nbytes = self.data.len() as u64 * 4;
        writeln!(writer, "\nImage Version {IMAGE_VERSION}")?;
        writeln!(
            writer,
            "w = {}, h = {}, c = {}, nbytes = {nbytes}",
            self.width, self.height, self.channels
        )?;

        for &val in &self.data {
            writer.write_all(&val.to_le_bytes())?;
        }

        writeln!(writer)?;
        Ok(())
    }

    /// Write an image to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write an image to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

/// Parse the text header, returning the shape, the declared payload size
/// and the offset where binary data starts.
fn parse_header(data: &[u8]) -> Result<(Shape, u64, usize)> {
    let header_end = find_header_end(data, 2)?;
    let header_text = std::str::from_utf8(&data[..header_end])
        .map_err(|e| Error::DecodeError(format!("image header is not valid UTF-8: {e}")))?;
    let mut lines = header_text.lines().map(str::trim).filter(|l| !l.is_empty());

    let version_line = lines
        .next()
        .ok_or_else(|| Error::DecodeError("version line not found".to_string()))?;
    let version: i32 = version_line
        .strip_prefix("Image Version ")
        .ok_or_else(|| Error::DecodeError(format!("not an image header: {version_line:?}")))?
        .trim()
        .parse()
        .map_err(|e| Error::DecodeError(format!("failed to parse image version: {e}")))?;
    if version != IMAGE_VERSION {
        return Err(Error::DecodeError(format!(
            "invalid image version: {version}"
        )));
    }

    let dim_line = lines
        .next()
        .ok_or_else(|| Error::DecodeError("dimension line not found".to_string()))?;

    let mut fields = [None; 4];
    for part in dim_line.split(',') {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| Error::DecodeError(format!("malformed header field: {part:?}")))?;
        let value: u64 = value
            .trim()
            .parse()
            .map_err(|e| Error::DecodeError(format!("failed to parse {}: {e}", key.trim())))?;
        let slot = match key.trim() {
            "w" => 0,
            "h" => 1,
            "c" => 2,
            "nbytes" => 3,
            other => {
                return Err(Error::DecodeError(format!("unknown header field: {other}")));
            }
        };
        fields[slot] = Some(value);
    }

    let field = |i: usize, name: &str| {
        fields[i].ok_or_else(|| Error::DecodeError(format!("missing header field: {name}")))
    };
    let to_u32 = |v: u64, name: &str| {
        u32::try_from(v).map_err(|_| Error::DecodeError(format!("{name} out of range: {v}")))
    };

    let shape = Shape::new(
        to_u32(field(0, "w")?, "w")?,
        to_u32(field(1, "h")?, "h")?,
        to_u32(field(2, "c")?, "c")?,
    );
    Ok((shape, field(3, "nbytes")?, header_end))
}

/// Find the byte offset right after the newline ending the
/// `content_lines`-th non-empty header line.
fn find_header_end(data: &[u8], content_lines: usize) -> Result<usize> {
    let scan_limit = data.len().min(512);
    let mut found = 0;
    let mut pos = 0;

    while pos < scan_limit {
        let Some(offset) = data[pos..scan_limit].iter().position(|&b| b == b'\n') else {
            break;
        };
        let line = &data[pos..pos + offset];
        if line.iter().any(|&b| b != b' ' && b != b'\r') {
            found += 1;
        }
        pos += offset + 1;
        if found == content_lines {
            return Ok(pos);
        }
    }

    Err(Error::DecodeError("image header incomplete".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_preserves_samples() {
        let data: Vec<f32> = (0..24).map(|v| v as f32 * 0.125 - 1.0).collect();
        let im = Image::from_data(4, 3, 2, data).unwrap();

        let bytes = im.write_to_bytes().unwrap();
        assert!(bytes.starts_with(b"\nImage Version 1\nw = 4, h = 3, c = 2, nbytes = 96\n"));

        let back = Image::read_from_bytes(&bytes).unwrap();
        assert_eq!(back, im);
    }

    #[test]
    fn test_read_rejects_bad_version() {
        let bytes = b"\nImage Version 9\nw = 1, h = 1, c = 1, nbytes = 4\n\0\0\0\0\n";
        assert!(Image::read_from_bytes(bytes).is_err());
    }

    #[test]
    fn test_read_rejects_truncated() {
        let bytes = b"\nImage Version 1\nw = 2, h = 1, c = 1, nbytes = 8\n\0\0\0\0";
        assert!(matches!(
            Image::read_from_bytes(bytes),
            Err(Error::DecodeError(_))
        ));
    }

    #[test]
    fn test_read_rejects_overflowing_shape() {
        let bytes =
            b"\nImage Version 1\nw = 4294967295, h = 4294967295, c = 4294967295, nbytes = 0\n";
        assert!(matches!(
            Image::read_from_bytes(bytes),
            Err(Error::DecodeError(_))
        ));
    }

    #[test]
    fn test_read_rejects_nbytes_mismatch() {
        let bytes = b"\nImage Version 1\nw = 1, h = 1, c = 1, nbytes = 8\n\0\0\0\0\0\0\0\0\n";
        assert!(Image::read_from_bytes(bytes).is_err());
    }
}
