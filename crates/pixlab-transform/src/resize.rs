//! Image resizing
//!
//! Destination pixel centers are mapped back into the source with
//!
//! ```text
//! src = scale * dst + offset,  scale = W / newW,  offset = -0.5 + 0.5 * scale
//! ```
//!
//! which lines up pixel centers of both grids (the left edge of the
//! destination coincides with the left edge of the source). Sampling off
//! the source grid uses the image's clamped accessor, so border pixels
//! repeat outward.

use crate::{TransformError, TransformResult};
use log::debug;
use pixlab_core::Image;

/// Interpolation method used when resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMethod {
    /// Nearest-neighbor sampling (blocky, keeps original sample values)
    Nearest,
    /// Bilinear interpolation of the four surrounding samples
    #[default]
    Bilinear,
}

impl ResizeMethod {
    /// Sample channel `c` of `image` at a real-valued position
    pub fn interpolate(self, image: &Image, x: f32, y: f32, c: u32) -> f32 {
        match self {
            ResizeMethod::Nearest => nn_interpolate(image, x, y, c),
            ResizeMethod::Bilinear => bilinear_interpolate(image, x, y, c),
        }
    }
}

/// Nearest-neighbor sample at a real-valued position.
///
/// Coordinates round half away from zero, so 0.5 maps to 1 and -0.5
/// maps to -1 (clamped to 0).
#[inline]
pub fn nn_interpolate(image: &Image, x: f32, y: f32, c: u32) -> f32 {
    image.get(x.round() as i32, y.round() as i32, c as i32)
}

/// Bilinear sample at a real-valued position.
///
/// Blends the samples at `floor` and `floor + 1` in each axis with weights
/// equal to the fractional distance. Integer positions return the sample
/// there exactly.
pub fn bilinear_interpolate(image: &Image, x: f32, y: f32, c: u32) -> f32 {
    let (xf, yf) = (x.floor(), y.floor());
    let (dx, dy) = (x - xf, y - yf);
    let (x0, y0, c) = (xf as i32, yf as i32, c as i32);

    let v00 = image.get(x0, y0, c);
    let v10 = image.get(x0 + 1, y0, c);
    let v01 = image.get(x0, y0 + 1, c);
    let v11 = image.get(x0 + 1, y0 + 1, c);

    let top = v00 * (1.0 - dx) + v10 * dx;
    let bottom = v01 * (1.0 - dx) + v11 * dx;
    top * (1.0 - dy) + bottom * dy
}

/// Resize with nearest-neighbor sampling
///
/// # Arguments
/// * `image` - Input image (any channel count)
/// * `width` - Output width, at least 1
/// * `height` - Output height, at least 1
pub fn nn_resize(image: &Image, width: u32, height: u32) -> TransformResult<Image> {
    resize(image, width, height, ResizeMethod::Nearest)
}

/// Resize with bilinear interpolation
///
/// Resizing to the same dimensions reproduces the input exactly.
pub fn bilinear_resize(image: &Image, width: u32, height: u32) -> TransformResult<Image> {
    resize(image, width, height, ResizeMethod::Bilinear)
}

/// Resize to exact output dimensions with the given method
///
/// The channel count is preserved.
///
/// # Errors
///
/// Returns [`TransformError::InvalidDimension`] if `width` or `height`
/// is 0.
pub fn resize(
    image: &Image,
    width: u32,
    height: u32,
    method: ResizeMethod,
) -> TransformResult<Image> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimension { width, height });
    }
    debug!(
        "resize: {} -> {}x{} ({:?})",
        image.shape(),
        width,
        height,
        method
    );

    let (xmap, ymap) = (
        axis_map(image.width(), width),
        axis_map(image.height(), height),
    );
    let channels = image.channels();
    let mut out = Image::new(width, height, channels)?;

    for c in 0..channels {
        for (y, &sy) in ymap.iter().enumerate() {
            let row = out.row_mut(y as u32, c);
            for (v, &sx) in row.iter_mut().zip(&xmap) {
                *v = method.interpolate(image, sx, sy, c);
            }
        }
    }

    Ok(out)
}

/// Source coordinate for every destination index along one axis
fn axis_map(src_len: u32, dst_len: u32) -> Vec<f32> {
    let scale = src_len as f32 / dst_len as f32;
    let offset = -0.5 + 0.5 * scale;
    (0..dst_len).map(|d| scale * d as f32 + offset).collect()
}

/// Resize by scale factors
///
/// Output dimensions are `round(W * scale_x)` by `round(H * scale_y)`,
/// never less than 1.
///
/// # Arguments
/// * `image` - Input image
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
/// * `method` - Interpolation method
pub fn scale(
    image: &Image,
    scale_x: f32,
    scale_y: f32,
    method: ResizeMethod,
) -> TransformResult<Image> {
    for (name, s) in [("scale_x", scale_x), ("scale_y", scale_y)] {
        if !s.is_finite() || s <= 0.0 {
            return Err(TransformError::InvalidScaleFactor(format!(
                "{} must be positive and finite, got {}",
                name, s
            )));
        }
    }

    let width = ((image.width() as f64 * scale_x as f64).round() as u32).max(1);
    let height = ((image.height() as f64 * scale_y as f64).round() as u32).max(1);
    resize(image, width, height, method)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_4x1() -> Image {
        Image::from_data(4, 1, 1, vec![0.0, 1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn test_axis_map_identity() {
        assert_eq!(axis_map(5, 5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_axis_map_halving() {
        // Destination pixel 0 covers source pixels 0 and 1
        assert_eq!(axis_map(4, 2), vec![0.5, 2.5]);
    }

    #[test]
    fn test_nn_interpolate_rounds_half_away() {
        let im = ramp_4x1();
        assert_eq!(nn_interpolate(&im, 0.5, 0.0, 0), 1.0);
        assert_eq!(nn_interpolate(&im, 1.49, 0.0, 0), 1.0);
        assert_eq!(nn_interpolate(&im, -0.5, 0.0, 0), 0.0);
        assert_eq!(nn_interpolate(&im, 9.0, 0.0, 0), 3.0);
    }

    #[test]
    fn test_bilinear_interpolate() {
        let im = ramp_4x1();
        assert_eq!(bilinear_interpolate(&im, 1.0, 0.0, 0), 1.0);
        assert_eq!(bilinear_interpolate(&im, 1.25, 0.0, 0), 1.25);
        // Past the right edge the border repeats
        assert_eq!(bilinear_interpolate(&im, 3.5, 0.0, 0), 3.0);
        assert_eq!(bilinear_interpolate(&im, -0.25, 0.0, 0), 0.0);
    }

    #[test]
    fn test_nn_downscale_values() {
        let im = ramp_4x1();
        let out = nn_resize(&im, 2, 1).unwrap();
        // 0.5 -> 1, 2.5 -> 3
        assert_eq!(out.data(), &[1.0, 3.0]);
    }

    #[test]
    fn test_bilinear_downscale_averages() {
        let im = ramp_4x1();
        let out = bilinear_resize(&im, 2, 1).unwrap();
        assert_eq!(out.data(), &[0.5, 2.5]);
    }

    #[test]
    fn test_zero_size_rejected() {
        let im = ramp_4x1();
        assert!(matches!(
            nn_resize(&im, 0, 3),
            Err(TransformError::InvalidDimension { width: 0, height: 3 })
        ));
        assert!(bilinear_resize(&im, 3, 0).is_err());
    }

    #[test]
    fn test_scale_dimensions() {
        let im = Image::new(10, 7, 2).unwrap();
        let out = scale(&im, 0.5, 2.0, ResizeMethod::Nearest).unwrap();
        assert_eq!(out.dimensions(), (5, 14));
        assert_eq!(out.channels(), 2);

        let tiny = scale(&im, 0.01, 0.01, ResizeMethod::Bilinear).unwrap();
        assert_eq!(tiny.dimensions(), (1, 1));

        assert!(scale(&im, 0.0, 1.0, ResizeMethod::Nearest).is_err());
        assert!(scale(&im, 1.0, f32::NAN, ResizeMethod::Nearest).is_err());
    }
}
