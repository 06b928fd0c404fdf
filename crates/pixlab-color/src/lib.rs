//! pixlab-color - Color space conversion for pixlab
//!
//! Works on planar `f32` images whose first three channels are R, G and B
//! in [0, 1]. Channels beyond the third (alpha, for example) are carried
//! through untouched by the in-place conversions.
//!
//! - RGB -> luminance (ITU-R BT.601)
//! - RGB <-> HSV, with hue expressed as a fraction of a turn in [0, 1)

pub mod colorspace;
mod error;

pub use colorspace::{
    Hsv, hsv_to_rgb, hsv_to_rgb_pixel, luminance, rgb_to_grayscale, rgb_to_hsv, rgb_to_hsv_pixel,
};
pub use error::{ColorError, ColorResult};
