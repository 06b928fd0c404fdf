//! pixlab Core - Basic data structures for image processing
//!
//! This crate provides the fundamental data structure used throughout the
//! pixlab image processing library:
//!
//! - [`Image`] - Planar multi-channel floating-point image
//! - [`feature_normalize`] / [`l1_normalize`] - In-place sample rescaling
//!
//! # Sampling policy
//!
//! Every component that reads near image borders goes through
//! [`Image::get`], which clamps each coordinate to the nearest valid index.
//! Samples are never wrapped and never zero-padded.

pub mod error;
pub mod image;
pub mod normalize;

pub use error::{Error, Result};
pub use image::{Image, Shape};
pub use normalize::{feature_normalize, l1_normalize};
