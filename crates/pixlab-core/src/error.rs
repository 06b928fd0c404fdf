//! Error types for pixlab-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use crate::image::Shape;
use thiserror::Error;

/// pixlab error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions (zero width, height or channel count)
    #[error("invalid image dimensions: {width}x{height}x{channels}")]
    InvalidDimension {
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Elementwise operation on images of different shape
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: Shape, actual: Shape },

    /// Channel count not accepted by the operation
    #[error("channel mismatch: expected {expected} channels, got {actual}")]
    ChannelMismatch { expected: u32, actual: u32 },

    /// Coordinate outside the image.
    ///
    /// Clamped accessors never produce this; it only comes out of the
    /// checked variants.
    #[error("coordinate out of range: ({x}, {y}, {c})")]
    OutOfRange { x: i64, y: i64, c: i64 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized image data could not be decoded
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for pixlab operations
pub type Result<T> = std::result::Result<T, Error>;
