//! In-place sample normalization
//!
//! Both functions mutate the image they are given. Callers that still need
//! the original samples must clone first.

use crate::Image;
use log::{debug, warn};

/// Rescale every sample linearly into [0, 1] by the global min and max.
///
/// The minimum and maximum are taken over all pixels and all channels
/// together. When every sample has the same value the image is set to
/// all zeros.
///
/// # Examples
///
/// ```
/// use pixlab_core::{Image, feature_normalize};
///
/// let mut im = Image::from_data(3, 1, 1, vec![2.0, 4.0, 6.0]).unwrap();
/// feature_normalize(&mut im);
/// assert_eq!(im.data(), &[0.0, 0.5, 1.0]);
/// ```
pub fn feature_normalize(image: &mut Image) {
    let (min, max) = image.min_max();
    let range = max - min;
    debug!("feature_normalize: min={min}, max={max}");

    if range == 0.0 || !range.is_finite() {
        image.clear();
        return;
    }

    for v in image.data_mut() {
        *v = (*v - min) / range;
    }
}

/// Divide every sample by the sum of all samples so they sum to 1.
///
/// An image whose samples sum to zero is left unchanged.
pub fn l1_normalize(image: &mut Image) {
    let sum = image.sum();
    if sum == 0.0 {
        warn!("l1_normalize: samples sum to zero, leaving image unchanged");
        return;
    }
    for v in image.data_mut() {
        *v /= sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_normalize_range() {
        let mut im = Image::from_data(2, 2, 2, vec![-3.0, 1.0, 5.0, 0.0, 2.0, -1.0, 4.0, 3.0])
            .unwrap();
        feature_normalize(&mut im);

        let (lo, hi) = im.min_max();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.0);
        assert_eq!(im.get(1, 0, 0), 0.5);
    }

    #[test]
    fn test_feature_normalize_constant() {
        let mut im = Image::new_with_value(3, 3, 3, 0.7).unwrap();
        feature_normalize(&mut im);
        assert!(im.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_feature_normalize_all_negative() {
        let mut im = Image::from_data(2, 1, 1, vec![-4.0, -2.0]).unwrap();
        feature_normalize(&mut im);
        assert_eq!(im.data(), &[0.0, 1.0]);
    }

    #[test]
    fn test_l1_normalize() {
        let mut im = Image::from_data(2, 2, 1, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        l1_normalize(&mut im);
        assert!(im.data().iter().all(|&v| v == 0.25));

        let mut zero = Image::new(2, 2, 1).unwrap();
        l1_normalize(&mut zero);
        assert!(zero.data().iter().all(|&v| v == 0.0));
    }
}
