//! Error types for pixlab-color

use thiserror::Error;

/// Errors that can occur during color conversion
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixlab_core::Error),

    /// The image has too few channels for the conversion
    #[error("channel mismatch: expected at least {expected} channels, got {actual}")]
    ChannelMismatch { expected: u32, actual: u32 },
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
