//! Image - Planar multi-channel floating-point image
//!
//! `Image` stores `width * height * channels` samples of type `f32`.
//! Processing operations allocate a fresh output `Image` and leave their
//! inputs untouched; only methods taking `&mut self` modify a buffer.
//!
//! See [`arith`] for elementwise arithmetic and [`serial`] for
//! serialization support.
//!
//! # Examples
//!
//! ```
//! use pixlab_core::Image;
//!
//! // Create a 100x80 RGB image
//! let mut im = Image::new(100, 80, 3).unwrap();
//!
//! // Set and get sample values
//! im.set(10, 20, 1, 0.5);
//! assert_eq!(im.get(10, 20, 1), 0.5);
//!
//! // Reads outside the image are clamped to the nearest edge
//! im.set(0, 0, 0, 0.25);
//! assert_eq!(im.get(-5, -5, 0), 0.25);
//! ```

pub mod arith;
pub mod serial;

use crate::error::{Error, Result};
use std::fmt;

/// Image shape as (width, height, channels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl Shape {
    /// Create a new shape
    pub fn new(width: u32, height: u32, channels: u32) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// Number of samples in an image of this shape
    ///
    /// Saturates at `usize::MAX`; use [`Shape::checked_sample_count`] on
    /// untrusted shapes.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.checked_sample_count().unwrap_or(usize::MAX)
    }

    /// Number of samples, or `None` if it does not fit in `usize`
    pub fn checked_sample_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.channels as usize)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// Planar floating-point image
///
/// # Memory Layout
///
/// Channels are stored as consecutive planes with no padding. The sample
/// at (x, y, c) is at index `c * width * height + y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Number of channels
    channels: u32,
    /// Sample data (planar, row-major within each plane)
    data: Vec<f32>,
}

impl Image {
    /// Create a new image with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixlab_core::Image;
    ///
    /// let im = Image::new(640, 480, 3).unwrap();
    /// assert_eq!(im.width(), 640);
    /// assert_eq!(im.height(), 480);
    /// assert_eq!(im.channels(), 3);
    /// ```
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Self::new_with_value(width, height, channels, 0.0)
    }

    /// Create a new image with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0.
    pub fn new_with_value(width: u32, height: u32, channels: u32, value: f32) -> Result<Self> {
        check_dimensions(width, height, channels)?;
        let size = Shape::new(width, height, channels).sample_count();

        Ok(Image {
            width,
            height,
            channels,
            data: vec![value; size],
        })
    }

    /// Create an image from planar sample data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length
    /// doesn't match `width * height * channels`.
    pub fn from_data(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        check_dimensions(width, height, channels)?;

        let expected = Shape::new(width, height, channels).sample_count();
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                channels,
                expected
            )));
        }

        Ok(Image {
            width,
            height,
            channels,
            data,
        })
    }

    /// Stack single-channel images into one multi-channel image
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for an empty slice,
    /// `Error::ChannelMismatch` if an input has more than one channel and
    /// `Error::ShapeMismatch` if the planes differ in size.
    pub fn from_channels(planes: &[Image]) -> Result<Self> {
        let first = planes
            .first()
            .ok_or_else(|| Error::InvalidParameter("no channels to stack".to_string()))?;

        let mut data = Vec::with_capacity(first.plane_len() * planes.len());
        for plane in planes {
            if plane.channels != 1 {
                return Err(Error::ChannelMismatch {
                    expected: 1,
                    actual: plane.channels,
                });
            }
            if plane.width != first.width || plane.height != first.height {
                return Err(Error::ShapeMismatch {
                    expected: first.shape(),
                    actual: plane.shape(),
                });
            }
            data.extend_from_slice(&plane.data);
        }

        Image::from_data(first.width, first.height, planes.len() as u32, data)
    }

    /// Create a zeroed image with the same shape
    pub fn create_template(&self) -> Image {
        Image {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: vec![0.0; self.data.len()],
        }
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Get the spatial dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the full shape
    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::new(self.width, self.height, self.channels)
    }

    /// Number of samples in one channel plane
    #[inline]
    pub fn plane_len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    fn index(&self, x: u32, y: u32, c: u32) -> usize {
        (c as usize) * self.plane_len() + (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get a sample with clamped coordinates
    ///
    /// Each of `x`, `y` and `c` is clamped into its valid range before the
    /// read, so a request past an edge returns the edge sample.
    #[inline]
    pub fn get(&self, x: i32, y: i32, c: i32) -> f32 {
        let x = x.clamp(0, self.width as i32 - 1) as u32;
        let y = y.clamp(0, self.height as i32 - 1) as u32;
        let c = c.clamp(0, self.channels as i32 - 1) as u32;
        self.data[self.index(x, y, c)]
    }

    /// Set a sample
    ///
    /// Writes outside the image are ignored. Use [`Image::try_set`] to get
    /// an error instead.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, c: i32, value: f32) {
        if self.contains(x, y, c) {
            let idx = self.index(x as u32, y as u32, c as u32);
            self.data[idx] = value;
        }
    }

    /// Set a sample, reporting writes outside the image
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if any coordinate is outside the image.
    pub fn try_set(&mut self, x: i32, y: i32, c: i32, value: f32) -> Result<()> {
        if !self.contains(x, y, c) {
            return Err(Error::OutOfRange {
                x: x as i64,
                y: y as i64,
                c: c as i64,
            });
        }
        let idx = self.index(x as u32, y as u32, c as u32);
        self.data[idx] = value;
        Ok(())
    }

    /// Whether (x, y, c) addresses a sample of this image
    #[inline]
    pub fn contains(&self, x: i32, y: i32, c: i32) -> bool {
        x >= 0
            && y >= 0
            && c >= 0
            && (x as u32) < self.width
            && (y as u32) < self.height
            && (c as u32) < self.channels
    }

    /// Get a sample without clamping
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the sample buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: u32) -> f32 {
        self.data[self.index(x, y, c)]
    }

    /// Set a sample without range checks
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the sample buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, c: u32, value: f32) {
        let idx = self.index(x, y, c);
        self.data[idx] = value;
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable access to the sample data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the image and return its sample data
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Get one channel plane
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    #[inline]
    pub fn plane(&self, c: u32) -> &[f32] {
        let start = (c as usize) * self.plane_len();
        &self.data[start..start + self.plane_len()]
    }

    /// Get one channel plane mutably
    ///
    /// # Panics
    ///
    /// Panics if `c >= channels`.
    #[inline]
    pub fn plane_mut(&mut self, c: u32) -> &mut [f32] {
        let len = self.plane_len();
        let start = (c as usize) * len;
        &mut self.data[start..start + len]
    }

    /// Get one row of one channel
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `c >= channels`.
    #[inline]
    pub fn row(&self, y: u32, c: u32) -> &[f32] {
        let start = self.index(0, y, c);
        &self.data[start..start + self.width as usize]
    }

    /// Get one row of one channel mutably
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `c >= channels`.
    #[inline]
    pub fn row_mut(&mut self, y: u32, c: u32) -> &mut [f32] {
        let start = self.index(0, y, c);
        let end = start + self.width as usize;
        &mut self.data[start..end]
    }

    /// Copy one channel out as a single-channel image
    ///
    /// # Errors
    ///
    /// Returns `Error::ChannelMismatch` if `c >= channels`.
    pub fn channel(&self, c: u32) -> Result<Image> {
        if c >= self.channels {
            return Err(Error::ChannelMismatch {
                expected: c + 1,
                actual: self.channels,
            });
        }
        Image::from_data(self.width, self.height, 1, self.plane(c).to_vec())
    }

    /// Set all samples to the specified value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Clear all samples to zero
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }

    /// Check that two images have the same shape
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if width, height or channel count
    /// differ.
    pub fn check_same_shape(&self, other: &Image) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }
}

fn check_dimensions(width: u32, height: u32, channels: u32) -> Result<()> {
    // Coordinates are addressed as i32 for clamped access
    let max = i32::MAX as u32;
    if width == 0 || height == 0 || channels == 0 || width > max || height > max || channels > max {
        return Err(Error::InvalidDimension {
            width,
            height,
            channels,
        });
    }
    // Sample count, and its byte size, must be addressable
    let bytes = Shape::new(width, height, channels)
        .checked_sample_count()
        .and_then(|n| n.checked_mul(std::mem::size_of::<f32>()));
    if bytes.is_none_or(|b| b > isize::MAX as usize) {
        return Err(Error::InvalidDimension {
            width,
            height,
            channels,
        });
    }
    Ok(())
}
