//! pixlab - Floating-point image processing
//!
//! # Overview
//!
//! pixlab works on planar `f32` images of any channel count and provides:
//!
//! - Image I/O (PNG, JPEG, PNM)
//! - Nearest-neighbor and bilinear resizing
//! - Convolution with box, Gaussian and fixed 3x3 kernels
//! - Sobel gradients and their color visualization
//! - Low/high frequency decomposition and hybrid images
//! - RGB <-> HSV and luminance conversion
//!
//! # Example
//!
//! ```
//! use pixlab::Image;
//! use pixlab::filter::gaussian_blur;
//! use pixlab::transform::bilinear_resize;
//!
//! let im = Image::new_with_value(64, 48, 3, 0.5).unwrap();
//! let small = bilinear_resize(&im, 32, 24).unwrap();
//! let soft = gaussian_blur(&small, 1.0).unwrap();
//! assert_eq!(soft.dimensions(), (32, 24));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixlab_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixlab_color as color;
pub use pixlab_filter as filter;
pub use pixlab_io as io;
pub use pixlab_transform as transform;
