//! Elementwise arithmetic and sample statistics
//!
//! Binary operations require both operands to have the same shape and
//! return a freshly allocated result. Per-channel adjustments (`shift`,
//! `scale`) and clamping work in place.

use super::Image;
use crate::error::Result;

impl Image {
    /// Add two images elementwise
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn add(&self, other: &Image) -> Result<Image> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Subtract `other` from this image elementwise
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn sub(&self, other: &Image) -> Result<Image> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Multiply two images elementwise
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn mul(&self, other: &Image) -> Result<Image> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Linear combination of two images: `a * im1 + b * im2`
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn linear_combination(a: f32, im1: &Image, b: f32, im2: &Image) -> Result<Image> {
        im1.zip_with(im2, |v1, v2| a * v1 + b * v2)
    }

    fn zip_with(&self, other: &Image, op: impl Fn(f32, f32) -> f32) -> Result<Image> {
        self.check_same_shape(other)?;

        let mut result = self.create_template();
        for ((out, &a), &b) in result
            .data
            .iter_mut()
            .zip(self.data.iter())
            .zip(other.data.iter())
        {
            *out = op(a, b);
        }
        Ok(result)
    }

    /// Add a constant to every sample of channel `c` (in-place)
    ///
    /// Does nothing if `c` is not a channel of this image.
    pub fn shift_channel(&mut self, c: u32, value: f32) {
        if c < self.channels {
            for v in self.plane_mut(c) {
                *v += value;
            }
        }
    }

    /// Multiply every sample of channel `c` by a constant (in-place)
    ///
    /// Does nothing if `c` is not a channel of this image.
    pub fn scale_channel(&mut self, c: u32, value: f32) {
        if c < self.channels {
            for v in self.plane_mut(c) {
                *v *= value;
            }
        }
    }

    /// Add a constant to all samples (in-place)
    pub fn add_constant(&mut self, value: f32) {
        for v in &mut self.data {
            *v += value;
        }
    }

    /// Multiply all samples by a constant (in-place)
    pub fn mul_constant(&mut self, value: f32) {
        for v in &mut self.data {
            *v *= value;
        }
    }

    /// Clamp all samples to [0, 1] (in-place)
    pub fn clamp(&mut self) {
        self.clamp_to(0.0, 1.0);
    }

    /// Clamp all samples to `[lo, hi]` (in-place)
    pub fn clamp_to(&mut self, lo: f32, hi: f32) {
        for v in &mut self.data {
            *v = v.clamp(lo, hi);
        }
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Global minimum and maximum over all samples
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Sum of all samples
    pub fn sum(&self) -> f32 {
        // f64 accumulator keeps large images from drifting
        self.data.iter().map(|&v| v as f64).sum::<f64>() as f32
    }

    /// Mean of all samples
    pub fn mean(&self) -> f32 {
        (self.data.iter().map(|&v| v as f64).sum::<f64>() / self.data.len() as f64) as f32
    }

    /// Largest absolute sample difference between two images
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if shapes differ.
    pub fn max_abs_diff(&self, other: &Image) -> Result<f32> {
        self.check_same_shape(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(0.0f32, |acc, (&a, &b)| acc.max((a - b).abs())))
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl std::ops::Add for &Image {
    type Output = Result<Image>;

    fn add(self, rhs: Self) -> Self::Output {
        Image::add(self, rhs)
    }
}

impl std::ops::Sub for &Image {
    type Output = Result<Image>;

    fn sub(self, rhs: Self) -> Self::Output {
        Image::sub(self, rhs)
    }
}

impl std::ops::Mul for &Image {
    type Output = Result<Image>;

    fn mul(self, rhs: Self) -> Self::Output {
        Image::mul(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_add_sub() {
        let a = Image::new_with_value(3, 3, 2, 5.0).unwrap();
        let b = Image::new_with_value(3, 3, 2, 2.0).unwrap();

        let sum = a.add(&b).unwrap();
        assert!(sum.data().iter().all(|&v| v == 7.0));

        let diff = (&a - &b).unwrap();
        assert!(diff.data().iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Image::new(3, 3, 1).unwrap();
        let b = Image::new(3, 3, 3).unwrap();
        assert!(matches!(a.add(&b), Err(Error::ShapeMismatch { .. })));
        assert!(matches!(&a - &b, Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_shift_and_scale_channel() {
        let mut im = Image::new_with_value(2, 2, 3, 0.5).unwrap();
        im.shift_channel(0, 0.25);
        im.scale_channel(2, 0.5);
        im.shift_channel(7, 1.0);

        assert!(im.plane(0).iter().all(|&v| v == 0.75));
        assert!(im.plane(1).iter().all(|&v| v == 0.5));
        assert!(im.plane(2).iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_clamp() {
        let mut im = Image::from_data(3, 1, 1, vec![-0.5, 0.5, 1.5]).unwrap();
        im.clamp();
        assert_eq!(im.data(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_statistics() {
        let im = Image::from_data(2, 2, 1, vec![-1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(im.min_max(), (-1.0, 4.0));
        assert_eq!(im.sum(), 8.0);
        assert_eq!(im.mean(), 2.0);
    }

    #[test]
    fn test_linear_combination() {
        let a = Image::new_with_value(2, 2, 1, 1.0).unwrap();
        let b = Image::new_with_value(2, 2, 1, 2.0).unwrap();
        let r = Image::linear_combination(3.0, &a, -1.0, &b).unwrap();
        assert!(r.data().iter().all(|&v| v == 1.0));
        assert_eq!(a.max_abs_diff(&b).unwrap(), 1.0);
    }
}
