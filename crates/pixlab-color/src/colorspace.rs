//! Color space conversion
//!
//! Pixel-level conversions on `f32` components in [0, 1], and whole-image
//! wrappers that apply them across the first three planes.

use crate::{ColorError, ColorResult};
use log::debug;
use pixlab_core::Image;

/// BT.601 luma weights for R, G and B
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// HSV color representation
///
/// - `h`: Hue in range [0.0, 1.0) (fraction of a full turn; red is 0)
/// - `s`: Saturation in range [0.0, 1.0]
/// - `v`: Value in range [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// Luminance of an RGB triple using ITU-R BT.601 coefficients
///
/// Formula: Y = 0.299*R + 0.587*G + 0.114*B
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// Convert an RGB triple to HSV
///
/// Gray inputs (zero chroma) get hue 0; black gets saturation 0.
pub fn rgb_to_hsv_pixel(r: f32, g: f32, b: f32) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let s = if max > 0.0 { chroma / max } else { 0.0 };

    let h = if chroma == 0.0 {
        0.0
    } else {
        let sector = if max == r {
            (g - b) / chroma
        } else if max == g {
            (b - r) / chroma + 2.0
        } else {
            (r - g) / chroma + 4.0
        };
        let h = sector / 6.0;
        let h = if h < 0.0 { h + 1.0 } else { h };
        // A tiny negative hue can round up to exactly one turn
        if h >= 1.0 { 0.0 } else { h }
    };

    Hsv { h, s, v: max }
}

/// Convert an HSV color to an RGB triple
///
/// Hue wraps, so 1.0 is the same as 0.0.
pub fn hsv_to_rgb_pixel(hsv: Hsv) -> (f32, f32, f32) {
    let Hsv { h, s, v } = hsv;
    if s == 0.0 {
        return (v, v, v);
    }

    let h6 = h.rem_euclid(1.0) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

fn require_rgb(image: &Image) -> ColorResult<()> {
    if image.channels() < 3 {
        return Err(ColorError::ChannelMismatch {
            expected: 3,
            actual: image.channels(),
        });
    }
    Ok(())
}

/// Convert an RGB image to a single-channel luminance image
///
/// # Errors
///
/// Returns [`ColorError::ChannelMismatch`] if the image has fewer than
/// three channels.
pub fn rgb_to_grayscale(image: &Image) -> ColorResult<Image> {
    require_rgb(image)?;
    let (w, h) = image.dimensions();
    debug!("rgb_to_grayscale: {}", image.shape());

    let mut gray = Image::new(w, h, 1)?;
    let (r, g, b) = (image.plane(0), image.plane(1), image.plane(2));
    for (i, out) in gray.data_mut().iter_mut().enumerate() {
        *out = luminance(r[i], g[i], b[i]);
    }
    Ok(gray)
}

/// Apply a per-pixel transform to the first three planes in place
fn map_rgb_planes(image: &mut Image, f: impl Fn(f32, f32, f32) -> (f32, f32, f32)) {
    let plane = image.plane_len();
    let data = image.data_mut();
    let (p0, rest) = data.split_at_mut(plane);
    let (p1, rest) = rest.split_at_mut(plane);
    let p2 = &mut rest[..plane];

    for i in 0..plane {
        let (a, b, c) = f(p0[i], p1[i], p2[i]);
        p0[i] = a;
        p1[i] = b;
        p2[i] = c;
    }
}

/// Convert the first three channels from RGB to HSV in place
///
/// After the call channel 0 holds hue, channel 1 saturation and channel 2
/// value.
pub fn rgb_to_hsv(image: &mut Image) -> ColorResult<()> {
    require_rgb(image)?;
    map_rgb_planes(image, |r, g, b| {
        let hsv = rgb_to_hsv_pixel(r, g, b);
        (hsv.h, hsv.s, hsv.v)
    });
    Ok(())
}

/// Convert the first three channels from HSV to RGB in place
pub fn hsv_to_rgb(image: &mut Image) -> ColorResult<()> {
    require_rgb(image)?;
    map_rgb_planes(image, |h, s, v| hsv_to_rgb_pixel(Hsv::new(h, s, v)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_primaries_to_hsv() {
        let red = rgb_to_hsv_pixel(1.0, 0.0, 0.0);
        assert_eq!(red, Hsv::new(0.0, 1.0, 1.0));

        let green = rgb_to_hsv_pixel(0.0, 1.0, 0.0);
        assert!(approx(green.h, 1.0 / 3.0));

        let blue = rgb_to_hsv_pixel(0.0, 0.0, 1.0);
        assert!(approx(blue.h, 2.0 / 3.0));

        // Magenta: negative sector wraps into [0, 1)
        let magenta = rgb_to_hsv_pixel(1.0, 0.0, 1.0);
        assert!(approx(magenta.h, 5.0 / 6.0));
    }

    #[test]
    fn test_gray_and_black() {
        let gray = rgb_to_hsv_pixel(0.4, 0.4, 0.4);
        assert_eq!(gray, Hsv::new(0.0, 0.0, 0.4));

        let black = rgb_to_hsv_pixel(0.0, 0.0, 0.0);
        assert_eq!(black, Hsv::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_hsv_rgb_inverse() {
        for &(r, g, b) in &[(0.2, 0.5, 0.9), (0.9, 0.1, 0.3), (0.6, 0.6, 0.1), (0.0, 0.3, 0.2)] {
            let (r2, g2, b2) = hsv_to_rgb_pixel(rgb_to_hsv_pixel(r, g, b));
            assert!(approx(r, r2) && approx(g, g2) && approx(b, b2));
        }
    }

    #[test]
    fn test_hue_wraps() {
        let (r, g, b) = hsv_to_rgb_pixel(Hsv::new(1.0, 1.0, 1.0));
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_luminance() {
        assert!(approx(luminance(1.0, 1.0, 1.0), 1.0));
        assert!(approx(luminance(1.0, 0.0, 0.0), 0.299));
    }

    #[test]
    fn test_grayscale_requires_rgb() {
        let im = Image::new(2, 2, 2).unwrap();
        assert!(matches!(
            rgb_to_grayscale(&im),
            Err(ColorError::ChannelMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_in_place_keeps_alpha() {
        let mut im = Image::new_with_value(2, 1, 4, 0.5).unwrap();
        im.set(0, 0, 0, 1.0);
        rgb_to_hsv(&mut im).unwrap();
        assert_eq!(im.get(1, 0, 1), 0.0);
        assert_eq!(im.get(0, 0, 3), 0.5);
        hsv_to_rgb(&mut im).unwrap();
        assert!(approx(im.get(0, 0, 0), 1.0));
        assert!(approx(im.get(0, 0, 1), 0.5));
    }
}
