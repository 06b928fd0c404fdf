//! Error types for pixlab-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixlab_core::Error),

    /// Invalid kernel size or shape parameter
    #[error("invalid kernel size: {0}")]
    InvalidSize(String),

    /// Kernel channel count is neither 1 nor the image's channel count
    #[error("channel mismatch: image has {image} channels, kernel has {kernel}")]
    ChannelMismatch {
        /// Image channel count
        image: u32,
        /// Kernel channel count
        kernel: u32,
    },

    /// Color conversion failed while preparing an intensity image
    #[error("color error: {0}")]
    Color(#[from] pixlab_color::ColorError),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
