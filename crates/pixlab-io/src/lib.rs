//! pixlab-io - Image I/O for pixlab
//!
//! Loads PNG, JPEG and binary PNM files into planar `f32` images with
//! samples in [0, 1], and writes images back out at 8 bits per sample.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |--------|------|-------|---------|
//! | PNG    | 1-4 channels, 8/16-bit | 1-4 channels | `png-format` |
//! | JPEG   | gray, RGB | gray, RGB | `jpeg` |
//! | PNM    | P5, P6 | P5, P6 | `pnm` |
//!
//! The file format on load is detected from magic bytes, not from the
//! file extension.

mod convert;
mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use log::debug;
use pixlab_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Load an image from a file.
///
/// # Examples
///
/// ```no_run
/// let im = pixlab_io::load_image("data/dog.jpg").unwrap();
/// println!("{}", im.shape());
/// ```
pub fn load_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!("load_image: {} as {:?}", path.display(), format);

    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

/// Decode an image held in memory
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Save an image to a file in the given format.
///
/// Samples are clamped to [0, 1] and quantized to 8 bits. The path is
/// used as given; no extension is appended.
pub fn save_image<P: AsRef<Path>>(image: &Image, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    debug!(
        "save_image: {} {} as {:?}",
        path.display(),
        image.shape(),
        format
    );

    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(image, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into an in-memory buffer
pub fn write_image_mem(image: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(image, &mut buffer, format)?;
    Ok(buffer)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Image> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

fn write_image_format<W: Write>(image: &Image, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(image, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(image, writer),
        #[allow(unreachable_patterns)]
        other => {
            let _ = (image, writer);
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}
