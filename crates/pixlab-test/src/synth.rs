//! Synthetic test images
//!
//! Regression tests build their inputs here instead of reading image
//! files, so every test is self-contained.

use pixlab_core::{Image, Result};

/// Image with every sample set to `value`
pub fn uniform(width: u32, height: u32, channels: u32, value: f32) -> Result<Image> {
    Image::new_with_value(width, height, channels, value)
}

/// Horizontal ramp from 0 at the left edge to 1 at the right edge.
///
/// Channel `c` is the ramp scaled by `1 / (c + 1)` so channels differ.
pub fn ramp(width: u32, height: u32, channels: u32) -> Result<Image> {
    let mut im = Image::new(width, height, channels)?;
    let denom = (width.max(2) - 1) as f32;
    for c in 0..channels {
        let k = 1.0 / (c + 1) as f32;
        for y in 0..height {
            for (x, v) in im.row_mut(y, c).iter_mut().enumerate() {
                *v = k * x as f32 / denom;
            }
        }
    }
    Ok(im)
}

/// Single-channel checkerboard of `cell`-sized squares, 0 and 1
pub fn checkerboard(width: u32, height: u32, cell: u32) -> Result<Image> {
    let cell = cell.max(1);
    let mut im = Image::new(width, height, 1)?;
    for y in 0..height {
        for x in 0..width {
            let on = ((x / cell) + (y / cell)) % 2 == 1;
            im.set_unchecked(x, y, 0, if on { 1.0 } else { 0.0 });
        }
    }
    Ok(im)
}

/// Single-channel vertical step edge: 0 left of `edge_x`, 1 from it on
pub fn step_edge(width: u32, height: u32, edge_x: u32) -> Result<Image> {
    let mut im = Image::new(width, height, 1)?;
    for y in 0..height {
        for (x, v) in im.row_mut(y, 0).iter_mut().enumerate() {
            *v = if (x as u32) >= edge_x { 1.0 } else { 0.0 };
        }
    }
    Ok(im)
}

/// RGB image of vertical bars: red, green, blue, white, black (repeating)
pub fn color_bars(width: u32, height: u32) -> Result<Image> {
    const BARS: [[f32; 3]; 5] = [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 0.0, 0.0],
    ];
    let mut im = Image::new(width, height, 3)?;
    let bar_w = (width / BARS.len() as u32).max(1);
    for y in 0..height {
        for x in 0..width {
            let bar = BARS[((x / bar_w) as usize) % BARS.len()];
            for (c, &v) in bar.iter().enumerate() {
                im.set_unchecked(x, y, c as u32, v);
            }
        }
    }
    Ok(im)
}

/// Smooth deterministic texture in [0, 1] with structure in both axes
pub fn texture(width: u32, height: u32, channels: u32) -> Result<Image> {
    let mut im = Image::new(width, height, channels)?;
    for c in 0..channels {
        let phase = c as f32 * 0.7;
        for y in 0..height {
            for x in 0..width {
                let (fx, fy) = (x as f32, y as f32);
                let v = 0.5
                    + 0.25 * (0.31 * fx + phase).sin()
                    + 0.15 * (0.47 * fy - phase).cos()
                    + 0.1 * (0.13 * (fx + 2.0 * fy)).sin();
                im.set_unchecked(x, y, c, v);
            }
        }
    }
    Ok(im)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        let im = ramp(5, 2, 2).unwrap();
        assert_eq!(im.get(0, 0, 0), 0.0);
        assert_eq!(im.get(4, 1, 0), 1.0);
        assert_eq!(im.get(4, 0, 1), 0.5);
    }

    #[test]
    fn test_checkerboard() {
        let im = checkerboard(4, 4, 2).unwrap();
        assert_eq!(im.get(0, 0, 0), 0.0);
        assert_eq!(im.get(2, 0, 0), 1.0);
        assert_eq!(im.get(2, 2, 0), 0.0);
    }

    #[test]
    fn test_texture_range() {
        let im = texture(32, 32, 3).unwrap();
        let (lo, hi) = im.min_max();
        assert!(lo >= 0.0 && hi <= 1.0);
        assert!(hi > lo);
    }
}
