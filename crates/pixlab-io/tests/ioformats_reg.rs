//! Image format I/O regression test
//!
//! Writes synthetic images in every supported format, reads them back and
//! checks shape and sample fidelity. PNG and PNM are lossless at 8 bits;
//! JPEG is checked with a loose tolerance.

use pixlab_core::Image;
use pixlab_io::{
    ImageFormat, detect_format, load_image, read_image_mem, save_image, write_image_mem,
};
use pixlab_test::{RegParams, synth};

/// Quantize to 8-bit levels so lossless formats reproduce samples exactly
fn quantized(im: &Image) -> Image {
    let mut q = im.clone();
    for v in q.data_mut() {
        *v = (v.clamp(0.0, 1.0) * 255.0).round() / 255.0;
    }
    q
}

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");

    let gray = quantized(&synth::texture(37, 23, 1).unwrap());
    let rgb = quantized(&synth::texture(37, 23, 3).unwrap());
    let rgba = quantized(&synth::texture(9, 5, 4).unwrap());

    // Test 1-4: lossless file roundtrips
    for (im, format, name) in [
        (&gray, ImageFormat::Png, "gray"),
        (&rgb, ImageFormat::Png, "rgb"),
        (&rgba, ImageFormat::Png, "rgba"),
        (&gray, ImageFormat::Pnm, "gray"),
        (&rgb, ImageFormat::Pnm, "rgb"),
    ] {
        let path = rp
            .outfile(&format!("{}.{}", name, format.extension()))
            .expect("output path");
        save_image(im, &path, format).expect("save image");
        rp.check(
            detect_format(&path).ok() == Some(format),
            "format detected from written file",
        );
        let back = load_image(&path).expect("load image");
        rp.compare_images(im, &back, 1e-6);
    }

    // JPEG is lossy: shape must survive, samples stay close on smooth input
    for im in [&gray, &rgb] {
        let bytes = write_image_mem(im, ImageFormat::Jpeg).expect("encode jpeg");
        let back = read_image_mem(&bytes).expect("decode jpeg");
        rp.check(back.shape() == im.shape(), "jpeg preserves shape");
        let diff = im.max_abs_diff(&back).unwrap_or(f32::INFINITY);
        rp.check(diff < 0.15, "jpeg samples within tolerance");
    }

    // Out-of-range samples are clamped on write
    let mut hot = Image::new(2, 1, 1).unwrap();
    hot.set(0, 0, 0, -0.5);
    hot.set(1, 0, 0, 1.5);
    let back = read_image_mem(&write_image_mem(&hot, ImageFormat::Png).unwrap()).unwrap();
    rp.compare_values(0.0, back.get(0, 0, 0) as f64, 0.0);
    rp.compare_values(1.0, back.get(1, 0, 0) as f64, 0.0);

    // Formats reject channel counts they cannot store
    let two = Image::new(4, 4, 2).unwrap();
    rp.check(
        write_image_mem(&two, ImageFormat::Jpeg).is_err(),
        "jpeg rejects 2 channels",
    );
    rp.check(
        write_image_mem(&two, ImageFormat::Pnm).is_err(),
        "pnm rejects 2 channels",
    );
    rp.check(
        write_image_mem(&two, ImageFormat::Png).is_ok(),
        "png accepts gray+alpha",
    );

    // Garbage input is an error, not a panic
    rp.check(read_image_mem(b"not an image").is_err(), "unknown bytes rejected");
    rp.check(
        read_image_mem(b"P6\n10 10\n255\n\x01\x02").is_err(),
        "truncated ppm rejected",
    );
    rp.check(
        read_image_mem(b"P6\n4294967295 4294967295\n255\n").is_err(),
        "ppm with overflowing dimensions rejected",
    );
    rp.check(
        read_image_mem(b"P6\n200000 200000\n255\n").is_err(),
        "ppm with oversized dimensions rejected",
    );

    assert!(rp.cleanup(), "ioformats regression test failed");
}
