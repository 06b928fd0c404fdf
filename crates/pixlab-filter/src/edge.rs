//! Edge detection and enhancement operations
//!
//! - Sobel gradient magnitude and direction -> `sobel_image`
//! - Gradient visualization as color -> `colorize_sobel`
//! - Laplacian high-pass -> `highpass`
//! - Sharpening and emboss -> `sharpen`, `emboss`

use crate::convolve::{convolve_image, gaussian_blur};
use crate::{FilterResult, Kernel};
use log::debug;
use pixlab_color::{hsv_to_rgb, rgb_to_grayscale};
use pixlab_core::{Image, feature_normalize};

/// How a multi-channel image is reduced before taking gradients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrayConversion {
    /// BT.601 luminance for 3+ channels; mean for 2; identity for 1
    #[default]
    Luminance,
    /// Use channel 0 only
    FirstChannel,
    /// Average of all channels
    Mean,
    /// Take gradients per channel and sum them
    SumChannels,
}

/// Options for [`sobel_image_with`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SobelOptions {
    pub gray: GrayConversion,
}

/// Options for [`colorize_sobel_with`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorizeOptions {
    pub sobel: SobelOptions,
    /// Gaussian blur applied to the colorized result; `None` skips it
    pub blur_sigma: Option<f32>,
}

impl Default for ColorizeOptions {
    fn default() -> Self {
        Self {
            sobel: SobelOptions::default(),
            blur_sigma: Some(1.0),
        }
    }
}

/// Gradient magnitude and direction, both single-channel
#[derive(Debug, Clone, PartialEq)]
pub struct SobelResult {
    /// `sqrt(gx^2 + gy^2)`
    pub magnitude: Image,
    /// `atan2(gy, gx)` in radians, in [-pi, pi]
    pub direction: Image,
}

/// Sobel gradients with the default luminance reduction.
///
/// # Examples
///
/// ```
/// use pixlab_core::Image;
/// use pixlab_filter::sobel_image;
///
/// let flat = Image::new_with_value(8, 8, 3, 0.4).unwrap();
/// let grad = sobel_image(&flat).unwrap();
/// assert!(grad.magnitude.data().iter().all(|&v| v == 0.0));
/// ```
pub fn sobel_image(image: &Image) -> FilterResult<SobelResult> {
    sobel_image_with(image, &SobelOptions::default())
}

/// Sobel gradients with an explicit channel reduction.
pub fn sobel_image_with(image: &Image, options: &SobelOptions) -> FilterResult<SobelResult> {
    debug!("sobel_image: {} ({:?})", image.shape(), options.gray);

    let (gx, gy) = match options.gray {
        GrayConversion::SumChannels => (
            convolve_image(image, &Kernel::sobel_x(), false)?,
            convolve_image(image, &Kernel::sobel_y(), false)?,
        ),
        mode => {
            let gray = to_intensity(image, mode)?;
            (
                convolve_image(&gray, &Kernel::sobel_x(), true)?,
                convolve_image(&gray, &Kernel::sobel_y(), true)?,
            )
        }
    };

    let mut magnitude = gx.create_template();
    let mut direction = gx.create_template();
    for (i, (&dx, &dy)) in gx.data().iter().zip(gy.data()).enumerate() {
        magnitude.data_mut()[i] = dx.hypot(dy);
        direction.data_mut()[i] = dy.atan2(dx);
    }

    Ok(SobelResult {
        magnitude,
        direction,
    })
}

/// Reduce an image to one intensity channel
fn to_intensity(image: &Image, mode: GrayConversion) -> FilterResult<Image> {
    let nc = image.channels();
    match mode {
        GrayConversion::FirstChannel => Ok(image.channel(0)?),
        GrayConversion::Luminance if nc == 1 => Ok(image.clone()),
        GrayConversion::Luminance if nc >= 3 => Ok(rgb_to_grayscale(image)?),
        // Two channels have no luminance weights; use the mean
        GrayConversion::Luminance | GrayConversion::Mean => channel_mean(image),
        // sobel_image_with takes gradients per channel for this mode
        GrayConversion::SumChannels => channel_mean(image),
    }
}

fn channel_mean(image: &Image) -> FilterResult<Image> {
    let nc = image.channels();
    let mut mean = image.channel(0)?;
    for c in 1..nc {
        for (m, &v) in mean.data_mut().iter_mut().zip(image.plane(c)) {
            *m += v;
        }
    }
    mean.mul_constant(1.0 / nc as f32);
    Ok(mean)
}

/// Visualize gradients as color with default options.
///
/// Hue encodes gradient direction; saturation and value encode gradient
/// magnitude. The result is a 3-channel RGB image in [0, 1], softened by
/// a Gaussian blur with sigma 1.
pub fn colorize_sobel(image: &Image) -> FilterResult<Image> {
    colorize_sobel_with(image, &ColorizeOptions::default())
}

/// Visualize gradients as color.
pub fn colorize_sobel_with(image: &Image, options: &ColorizeOptions) -> FilterResult<Image> {
    let SobelResult {
        mut magnitude,
        mut direction,
    } = sobel_image_with(image, &options.sobel)?;

    feature_normalize(&mut magnitude);
    feature_normalize(&mut direction);

    let mut color = Image::from_channels(&[direction, magnitude.clone(), magnitude])?;
    hsv_to_rgb(&mut color)?;

    match options.blur_sigma {
        Some(sigma) => gaussian_blur(&color, sigma),
        None => Ok(color),
    }
}

/// Laplacian high-pass response, channels summed into one.
pub fn highpass(image: &Image) -> FilterResult<Image> {
    convolve_image(image, &Kernel::highpass(), false)
}

/// Sharpen each channel, clamping the result to [0, 1].
pub fn sharpen(image: &Image) -> FilterResult<Image> {
    let mut out = convolve_image(image, &Kernel::sharpen(), true)?;
    out.clamp();
    Ok(out)
}

/// Emboss each channel, clamping the result to [0, 1].
pub fn emboss(image: &Image) -> FilterResult<Image> {
    let mut out = convolve_image(image, &Kernel::emboss(), true)?;
    out.clamp();
    Ok(out)
}
