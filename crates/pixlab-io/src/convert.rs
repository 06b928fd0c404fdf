//! Conversion between planar `f32` images and interleaved 8-bit buffers
//!
//! Decoded samples map to `v / 255`. Encoding clamps to [0, 1] and rounds
//! to the nearest 8-bit level.

use crate::IoResult;
use log::warn;
use pixlab_core::Image;

/// Build a planar image from interleaved 8-bit samples.
pub(crate) fn from_interleaved_u8(
    width: u32,
    height: u32,
    channels: u32,
    data: &[u8],
) -> IoResult<Image> {
    let mut image = Image::new(width, height, channels)?;
    let nc = channels as usize;
    let plane = image.plane_len();
    let samples = image.data_mut();

    for (i, px) in data.chunks_exact(nc).take(plane).enumerate() {
        for (c, &v) in px.iter().enumerate() {
            samples[c * plane + i] = v as f32 / 255.0;
        }
    }
    Ok(image)
}

/// Flatten a planar image into interleaved 8-bit samples.
pub(crate) fn to_interleaved_u8(image: &Image) -> Vec<u8> {
    let nc = image.channels() as usize;
    let plane = image.plane_len();
    let samples = image.data();
    let mut out = vec![0u8; plane * nc];
    let mut clipped = 0usize;

    for i in 0..plane {
        for c in 0..nc {
            let v = samples[c * plane + i];
            if !(0.0..=1.0).contains(&v) {
                clipped += 1;
            }
            out[i * nc + c] = quantize(v);
        }
    }

    if clipped > 0 {
        warn!("{clipped} samples outside [0, 1] clamped on encode");
    }
    out
}

#[inline]
fn quantize(v: f32) -> u8 {
    // NaN maps to 0
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
