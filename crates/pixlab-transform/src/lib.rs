//! pixlab-transform - Geometric resampling for pixlab
//!
//! This crate provides image resizing:
//!
//! - Nearest-neighbor resize
//! - Bilinear resize
//! - Point samplers for both interpolation methods
//! - Resize by scale factor

mod error;
pub mod resize;

pub use error::{TransformError, TransformResult};
pub use resize::{
    ResizeMethod, bilinear_interpolate, bilinear_resize, nn_interpolate, nn_resize, resize, scale,
};
