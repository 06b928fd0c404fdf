//! Frequency decomposition
//!
//! Splits an image into a Gaussian low-pass band and the residual
//! high-pass band, and blends bands of two images into a hybrid image.

use crate::FilterResult;
use crate::convolve::gaussian_blur;
use log::debug;
use pixlab_core::Image;

/// Low- and high-frequency bands of an image
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyBands {
    /// Gaussian-blurred image
    pub low: Image,
    /// Original minus `low`
    pub high: Image,
}

impl FrequencyBands {
    /// Add the bands back together
    pub fn reconstruct(&self) -> FilterResult<Image> {
        Ok((&self.low + &self.high)?)
    }
}

/// Split an image into low and high frequency bands.
///
/// `low + high` reproduces the input up to float rounding.
pub fn split_frequencies(image: &Image, sigma: f32) -> FilterResult<FrequencyBands> {
    debug!("split_frequencies: {} sigma={}", image.shape(), sigma);
    let low = gaussian_blur(image, sigma)?;
    let high = (image - &low)?;
    Ok(FrequencyBands { low, high })
}

/// Low frequencies of `a` plus high frequencies of `b`.
///
/// Both images must have the same shape.
pub fn hybrid(a: &Image, b: &Image, sigma: f32) -> FilterResult<Image> {
    a.check_same_shape(b)?;
    let low = gaussian_blur(a, sigma)?;
    let high = split_frequencies(b, sigma)?.high;
    Ok((&low + &high)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_has_no_high_band() {
        let im = Image::new_with_value(6, 6, 2, 0.25).unwrap();
        let bands = split_frequencies(&im, 1.0).unwrap();
        assert!(bands.high.data().iter().all(|&v| v.abs() < 1e-6));
        assert!(im.max_abs_diff(&bands.reconstruct().unwrap()).unwrap() < 1e-6);
    }

    #[test]
    fn test_hybrid_shape_mismatch() {
        let a = Image::new(4, 4, 1).unwrap();
        let b = Image::new(4, 5, 1).unwrap();
        assert!(hybrid(&a, &b, 1.0).is_err());
    }

    #[test]
    fn test_hybrid_of_same_image_is_identity() {
        let im = Image::from_data(3, 3, 1, (0..9).map(|v| v as f32 / 8.0).collect()).unwrap();
        let out = hybrid(&im, &im, 0.8).unwrap();
        assert!(im.max_abs_diff(&out).unwrap() < 1e-5);
    }
}
