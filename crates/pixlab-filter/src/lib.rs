//! pixlab-filter - Image filtering operations
//!
//! This crate provides image filtering operations including:
//!
//! - Kernel construction (box, Gaussian, Sobel, high-pass, sharpen, emboss)
//! - Same-size correlation with clamped borders
//! - Sobel gradients and their color visualization
//! - Low/high frequency decomposition and hybrid images

pub mod convolve;
pub mod edge;
mod error;
pub mod frequency;
pub mod kernel;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, MAX_KERNEL_SIZE};

// Re-export commonly used functions
pub use convolve::{box_blur, convolve_image, gaussian_blur};
pub use edge::{
    ColorizeOptions, GrayConversion, SobelOptions, SobelResult, colorize_sobel,
    colorize_sobel_with, emboss, highpass, sharpen, sobel_image, sobel_image_with,
};
pub use frequency::{FrequencyBands, hybrid, split_frequencies};
