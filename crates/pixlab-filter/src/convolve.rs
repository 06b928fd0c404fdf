//! Convolution operations
//!
//! Implements same-size 2D correlation of an image with a [`Kernel`].
//! The kernel is not flipped; its center tap sits at
//! `(width / 2, height / 2)`. Pixels outside the image boundary take the
//! value of the nearest edge pixel.

use crate::{FilterError, FilterResult, Kernel};
use log::debug;
use pixlab_core::Image;

/// Correlate an image with a kernel.
///
/// # Arguments
/// * `image` - Input image, any channel count
/// * `kernel` - Single-channel kernel (applied to every channel) or a
///   kernel with one channel per image channel
/// * `preserve` - Keep the image's channel count when `true`; sum the
///   per-channel results into one channel when `false`
///
/// # Errors
///
/// Returns [`FilterError::ChannelMismatch`] if the kernel has more than one
/// channel and that count differs from the image's.
pub fn convolve_image(image: &Image, kernel: &Kernel, preserve: bool) -> FilterResult<Image> {
    let nc = image.channels();
    let kc = kernel.channels();
    if kc != 1 && kc != nc {
        return Err(FilterError::ChannelMismatch {
            image: nc,
            kernel: kc,
        });
    }

    let (w, h) = image.dimensions();
    debug!(
        "convolve_image: {} with {}x{}x{} kernel, preserve={}",
        image.shape(),
        kernel.width(),
        kernel.height(),
        kc,
        preserve
    );

    let out_channels = if preserve { nc } else { 1 };
    let mut out = Image::new(w, h, out_channels)?;

    for c in 0..nc {
        let kchan = if kc == 1 { 0 } else { c };
        let filtered = correlate_plane(image, c, kernel, kchan);
        let dst = out.plane_mut(if preserve { c } else { 0 });
        for (d, v) in dst.iter_mut().zip(filtered) {
            *d += v;
        }
    }

    Ok(out)
}

/// Correlate one image plane with one kernel plane
fn correlate_plane(image: &Image, c: u32, kernel: &Kernel, kchan: u32) -> Vec<f32> {
    let (w, h) = image.dimensions();
    let (kw, kh) = (kernel.width(), kernel.height());
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;
    let weights = kernel.as_image().plane(kchan);
    let src = image.plane(c);

    // Clamped source column for every (output x, kernel x) pair
    let xidx: Vec<usize> = (0..w as i32)
        .flat_map(|x| {
            (0..kw as i32).map(move |kx| (x + kx - kcx).clamp(0, w as i32 - 1) as usize)
        })
        .collect();

    let mut out = vec![0.0f32; (w as usize) * (h as usize)];
    for y in 0..h as i32 {
        let orow = &mut out[(y as usize) * (w as usize)..][..w as usize];
        for ky in 0..kh as i32 {
            let sy = (y + ky - kcy).clamp(0, h as i32 - 1) as usize;
            let srow = &src[sy * (w as usize)..][..w as usize];
            let krow = &weights[(ky as usize) * (kw as usize)..][..kw as usize];

            for (x, o) in orow.iter_mut().enumerate() {
                let cols = &xidx[x * (kw as usize)..][..kw as usize];
                *o += krow
                    .iter()
                    .zip(cols)
                    .map(|(&k, &sx)| k * srow[sx])
                    .sum::<f32>();
            }
        }
    }
    out
}

/// Box blur with a `size` x `size` averaging kernel, keeping channels.
pub fn box_blur(image: &Image, size: u32) -> FilterResult<Image> {
    convolve_image(image, &Kernel::box_filter(size)?, true)
}

/// Gaussian blur with standard deviation `sigma`, keeping channels.
pub fn gaussian_blur(image: &Image, sigma: f32) -> FilterResult<Image> {
    convolve_image(image, &Kernel::gaussian(sigma)?, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_kernel() {
        let im = Image::from_data(3, 2, 2, (0..12).map(|v| v as f32).collect()).unwrap();
        let k = Kernel::from_slice(1, 1, &[1.0]).unwrap();
        let out = convolve_image(&im, &k, true).unwrap();
        assert_eq!(out, im);
    }

    #[test]
    fn test_correlation_not_flipped() {
        // Kernel picks the right-hand neighbor
        let im = Image::from_data(3, 1, 1, vec![1.0, 2.0, 3.0]).unwrap();
        let k = Kernel::from_slice(3, 1, &[0.0, 0.0, 1.0]).unwrap();
        let out = convolve_image(&im, &k, true).unwrap();
        assert_eq!(out.data(), &[2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_even_kernel_center() {
        // 2x1 kernel is centered at x = 1, so it reads x - 1 and x
        let im = Image::from_data(3, 1, 1, vec![1.0, 2.0, 4.0]).unwrap();
        let k = Kernel::from_slice(2, 1, &[1.0, 0.0]).unwrap();
        let out = convolve_image(&im, &k, true).unwrap();
        assert_eq!(out.data(), &[1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_clamped_border() {
        let im = Image::from_data(3, 1, 1, vec![3.0, 0.0, 0.0]).unwrap();
        let k = Kernel::box_filter(3).unwrap();
        let out = convolve_image(&im, &k, true).unwrap();
        // Left border reads [3, 3, 0]
        assert!((out.get(0, 0, 0) - 2.0).abs() < 1e-6);
        assert!((out.get(1, 0, 0) - 1.0).abs() < 1e-6);
        assert!(out.get(2, 0, 0).abs() < 1e-6);
    }

    #[test]
    fn test_collapse_channels() {
        let mut im = Image::new(2, 2, 3).unwrap();
        im.plane_mut(0).fill(1.0);
        im.plane_mut(1).fill(2.0);
        im.plane_mut(2).fill(4.0);
        let k = Kernel::from_slice(1, 1, &[1.0]).unwrap();

        let out = convolve_image(&im, &k, false).unwrap();
        assert_eq!(out.channels(), 1);
        assert!(out.data().iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_per_channel_kernel() {
        let im = Image::new_with_value(2, 2, 2, 1.0).unwrap();
        let kimg = Image::from_data(1, 1, 2, vec![2.0, -1.0]).unwrap();
        let out = convolve_image(&im, &Kernel::from_image(kimg), true).unwrap();
        assert_eq!(out.get(0, 0, 0), 2.0);
        assert_eq!(out.get(1, 1, 1), -1.0);
    }

    #[test]
    fn test_channel_mismatch() {
        let im = Image::new(4, 4, 3).unwrap();
        let kimg = Image::new(3, 3, 2).unwrap();
        let err = convolve_image(&im, &Kernel::from_image(kimg), true).unwrap_err();
        assert!(matches!(
            err,
            FilterError::ChannelMismatch {
                image: 3,
                kernel: 2
            }
        ));
    }
}
