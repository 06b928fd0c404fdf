//! Convolution kernels
//!
//! A [`Kernel`] is a small image of weights plus a flag recording whether
//! the weights sum to one. Most kernels are single-channel; a kernel with
//! as many channels as the image it is applied to filters each channel
//! with its own weights.

use crate::{FilterError, FilterResult};
use log::debug;
use pixlab_core::Image;
use std::f32::consts::PI;

/// Largest kernel side accepted by the constructors
pub const MAX_KERNEL_SIZE: u32 = 4095;

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Weights, one plane per channel
    image: Image,
    /// Whether the weights have been scaled to sum to 1
    normalized: bool,
}

impl Kernel {
    /// Create a single-channel kernel from row-major weights.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let image = Image::from_data(width, height, 1, data.to_vec())?;
        Ok(Self {
            image,
            normalized: false,
        })
    }

    /// Wrap an existing image as a kernel (any channel count).
    pub fn from_image(image: Image) -> Self {
        Self {
            image,
            normalized: false,
        }
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`. `size` must be in
    /// `1..=MAX_KERNEL_SIZE`.
    pub fn box_filter(size: u32) -> FilterResult<Self> {
        if size == 0 || size > MAX_KERNEL_SIZE {
            return Err(FilterError::InvalidSize(format!(
                "box filter size must be in 1..={}, got {}",
                MAX_KERNEL_SIZE, size
            )));
        }
        let weight = 1.0 / (size as f32 * size as f32);
        let image = Image::new_with_value(size, size, 1, weight)?;
        Ok(Self {
            image,
            normalized: true,
        })
    }

    /// Create a Gaussian kernel for standard deviation `sigma`.
    ///
    /// The side length is the smallest odd integer that is at least
    /// `ceil(6 * sigma)`, so the kernel covers three standard deviations
    /// on either side of the center. Weights come from the 2D normal
    /// density and are rescaled to sum to 1. Sigmas needing a side larger
    /// than [`MAX_KERNEL_SIZE`] are rejected.
    pub fn gaussian(sigma: f32) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidSize(format!(
                "gaussian sigma must be positive and finite, got {}",
                sigma
            )));
        }

        let size = gaussian_size(sigma).ok_or_else(|| {
            FilterError::InvalidSize(format!(
                "gaussian sigma {} needs a kernel wider than {}",
                sigma, MAX_KERNEL_SIZE
            ))
        })?;
        let center = (size / 2) as f32;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut image = Image::new(size, size, 1)?;

        for y in 0..size {
            let dy = y as f32 - center;
            for (x, v) in image.row_mut(y, 0).iter_mut().enumerate() {
                let dx = x as f32 - center;
                *v = (-(dx * dx + dy * dy) / two_sigma_sq).exp() / (PI * two_sigma_sq);
            }
        }
        debug!("gaussian kernel: sigma={sigma}, size={size}");

        let mut kernel = Self::from_image(image);
        kernel.l1_normalize();
        Ok(kernel)
    }

    /// Create a 3x3 high-pass (Laplacian) kernel.
    pub fn highpass() -> Self {
        Self::fixed_3x3([0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0])
    }

    /// Create a 3x3 sharpening kernel (identity plus high-pass).
    pub fn sharpen() -> Self {
        Self::fixed_3x3([0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0])
    }

    /// Create a 3x3 emboss kernel.
    pub fn emboss() -> Self {
        Self::fixed_3x3([-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0])
    }

    /// Sobel kernel responding to change along x.
    pub fn sobel_x() -> Self {
        Self::fixed_3x3([-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
    }

    /// Sobel kernel responding to change along y.
    pub fn sobel_y() -> Self {
        Self::fixed_3x3([-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
    }

    fn fixed_3x3(weights: [f32; 9]) -> Self {
        let image = Image::from_data(3, 3, 1, weights.to_vec())
            .unwrap_or_else(|_| unreachable!("3x3x1 is a valid image shape"));
        Self::from_image(image)
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Get the number of kernel channels.
    #[inline]
    pub fn channels(&self) -> u32 {
        self.image.channels()
    }

    /// X coordinate of the center tap (`width / 2`).
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.width() / 2
    }

    /// Y coordinate of the center tap (`height / 2`).
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.height() / 2
    }

    /// Whether the weights were scaled to sum to 1
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// The weights as an image
    pub fn as_image(&self) -> &Image {
        &self.image
    }

    /// Get the weights as a flat planar slice
    pub fn data(&self) -> &[f32] {
        self.image.data()
    }

    /// Get a weight, or `None` outside the kernel.
    #[inline]
    pub fn get(&self, x: u32, y: u32, c: u32) -> Option<f32> {
        if x < self.width() && y < self.height() && c < self.channels() {
            Some(self.image.get_unchecked(x, y, c))
        } else {
            None
        }
    }

    /// Set a weight. Clears the normalized flag.
    pub fn set(&mut self, x: u32, y: u32, c: u32, value: f32) -> FilterResult<()> {
        self.image.try_set(x as i32, y as i32, c as i32, value)?;
        self.normalized = false;
        Ok(())
    }

    /// Get the sum of all weights.
    pub fn sum(&self) -> f32 {
        self.image.sum()
    }

    /// Scale the weights so they sum to 1.
    ///
    /// A kernel whose weights sum to zero (Sobel, high-pass) is left
    /// unchanged and stays unnormalized.
    pub fn l1_normalize(&mut self) {
        if self.sum() != 0.0 {
            pixlab_core::l1_normalize(&mut self.image);
            self.normalized = true;
        }
    }
}

/// Side length of a Gaussian kernel for `sigma`, if within
/// [`MAX_KERNEL_SIZE`]
fn gaussian_size(sigma: f32) -> Option<u32> {
    let side = (6.0 * sigma).ceil();
    if side > MAX_KERNEL_SIZE as f32 {
        return None;
    }
    let size = (side as u32).max(1);
    let size = if size % 2 == 0 { size + 1 } else { size };
    (size <= MAX_KERNEL_SIZE).then_some(size)
}
