//! Frequency decomposition regression test
//!
//! Checks that low + high reproduces the input, that the low band of a
//! uniform image is the image itself, and hybrid image construction.

use pixlab_filter::{hybrid, split_frequencies};
use pixlab_test::{RegParams, synth};
use pixlab_transform::bilinear_resize;

#[test]
fn frequency_reg() {
    let mut rp = RegParams::new("frequency");

    // --- Test 1: decomposition law for several sigmas ---
    let tex = synth::texture(33, 21, 3).unwrap();
    for sigma in [0.5, 1.0, 2.0, 4.0] {
        let bands = split_frequencies(&tex, sigma).unwrap();
        let back = bands.reconstruct().unwrap();
        rp.compare_images(&tex, &back, 1e-5);
    }

    // --- Test 2: uniform image has all energy in the low band ---
    let flat = synth::uniform(8, 8, 1, 0.4).unwrap();
    let bands = split_frequencies(&flat, 2.0).unwrap();
    rp.compare_images(&flat, &bands.low, 1e-5);
    rp.compare_values(0.0, bands.high.min_max().1.abs() as f64, 1e-5);

    // --- Test 3: the high band of a checkerboard carries the detail ---
    let board = synth::checkerboard(24, 24, 2).unwrap();
    let bands = split_frequencies(&board, 2.0).unwrap();
    let (lo, hi) = bands.high.min_max();
    rp.check(hi - lo > 0.5, "checkerboard detail in high band");
    rp.compare_values(0.0, bands.high.mean() as f64, 0.05);

    // --- Test 4: hybrid images ---
    let ramp = bilinear_resize(&synth::ramp(6, 24, 1).unwrap(), 24, 24).unwrap();
    let mixed = hybrid(&ramp, &board, 2.0).unwrap();
    rp.check(mixed.shape() == ramp.shape(), "hybrid keeps shape");

    let self_hybrid = hybrid(&tex, &tex, 1.5).unwrap();
    rp.compare_images(&tex, &self_hybrid, 1e-5);

    rp.check(hybrid(&ramp, &tex, 1.0).is_err(), "hybrid rejects shape mismatch");

    assert!(rp.cleanup(), "frequency regression test failed");
}
