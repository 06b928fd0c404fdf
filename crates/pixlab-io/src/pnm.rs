//! PNM (Portable Any Map) format support
//!
//! Reads and writes binary PGM (P5) and PPM (P6) with a maxval of up to
//! 65535. ASCII variants (P1/P2/P3), PBM and PAM are not supported.

use crate::convert::to_interleaved_u8;
use crate::{IoError, IoResult};
use pixlab_core::Image;
use std::io::{BufRead, Read, Write};

/// Maximum sample count accepted when reading (2^29)
const MAX_SAMPLES: u64 = 1 << 29;

/// Read a PGM (P5) or PPM (P6) image from a reader.
///
/// Samples are divided by `maxval`, so the result lies in [0, 1].
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Image> {
    let magic = read_token(&mut reader)?;
    let channels = match magic.as_str() {
        "P5" => 1u32,
        "P6" => 3u32,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                other
            )));
        }
    };

    let width = parse_header_value(&read_token(&mut reader)?, "width")?;
    let height = parse_header_value(&read_token(&mut reader)?, "height")?;
    let maxval = parse_header_value(&read_token(&mut reader)?, "maxval")?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PNM maxval {}", maxval)));
    }

    let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
    let nsamples = (width as u64)
        .checked_mul(height as u64)
        .and_then(|n| n.checked_mul(channels as u64))
        .filter(|&n| n > 0 && n <= MAX_SAMPLES)
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "unsupported PNM dimensions {}x{}x{}",
                width, height, channels
            ))
        })? as usize;
    let mut raw = vec![0u8; nsamples * bytes_per_sample];
    reader.read_exact(&mut raw)?;

    let mut image = Image::new(width, height, channels)?;
    let plane = image.plane_len();
    let nc = channels as usize;
    let maxval = maxval as f32;
    let samples = image.data_mut();

    for i in 0..nsamples {
        let v = if bytes_per_sample == 1 {
            raw[i] as u32
        } else {
            ((raw[2 * i] as u32) << 8) | raw[2 * i + 1] as u32
        };
        let (px, c) = (i / nc, i % nc);
        samples[c * plane + px] = v as f32 / maxval;
    }

    Ok(image)
}

/// Write a 1-channel image as P5 or a 3-channel image as P6 (maxval 255).
pub fn write_pnm<W: Write>(image: &Image, mut writer: W) -> IoResult<()> {
    let magic = match image.channels() {
        1 => "P5",
        3 => "P6",
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM cannot store {} channels",
                n
            )));
        }
    };

    write!(writer, "{}\n{} {}\n255\n", magic, image.width(), image.height())?;
    writer.write_all(&to_interleaved_u8(image))?;
    Ok(())
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token, so the raster
/// starts right after the maxval.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];
    let mut in_comment = false;

    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("truncated PNM header".to_string()));
            }
            break;
        }
        let b = byte[0];
        if in_comment {
            in_comment = b != b'\n' && b != b'\r';
            continue;
        }
        if b == b'#' && token.is_empty() {
            in_comment = true;
        } else if b.is_ascii_whitespace() {
            if !token.is_empty() {
                break;
            }
        } else {
            token.push(b);
        }
    }

    String::from_utf8(token).map_err(|_| IoError::InvalidData("non-ASCII PNM header".to_string()))
}

fn parse_header_value(token: &str, name: &str) -> IoResult<u32> {
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", name, token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_pgm_with_comment() {
        let mut data = b"P5\n# made by hand\n3 1\n255\n".to_vec();
        data.extend_from_slice(&[0, 51, 255]);
        let im = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(im.shape().to_string(), "3x1x1");
        assert_eq!(im.data(), &[0.0, 0.2, 1.0]);
    }

    #[test]
    fn test_read_ppm_16bit() {
        let mut data = b"P6 1 1 65535\n".to_vec();
        data.extend_from_slice(&[0xFF, 0xFF, 0x00, 0x00, 0x80, 0x00]);
        let im = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(im.channels(), 3);
        assert_eq!(im.get(0, 0, 0), 1.0);
        assert_eq!(im.get(0, 0, 1), 0.0);
        assert!((im.get(0, 0, 2) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_write_then_read_ppm() {
        let mut im = Image::new(2, 2, 3).unwrap();
        im.set(1, 0, 2, 1.0);
        im.set(0, 1, 0, 1.0);

        let mut buffer = Vec::new();
        write_pnm(&im, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P6\n2 2\n255\n"));

        let im2 = read_pnm(Cursor::new(buffer)).unwrap();
        assert_eq!(im2, im);
    }

    #[test]
    fn test_oversized_header_rejected() {
        for header in [
            &b"P6\n4294967295 4294967295\n255\n"[..],
            &b"P6 200000 200000 255\n"[..],
            &b"P5 0 10 255\n"[..],
        ] {
            assert!(matches!(
                read_pnm(Cursor::new(header.to_vec())),
                Err(IoError::InvalidData(_))
            ));
        }
    }

    #[test]
    fn test_truncated_raster() {
        let data = b"P5\n4 4\n255\n\x00\x00".to_vec();
        assert!(read_pnm(Cursor::new(data)).is_err());
    }
}
