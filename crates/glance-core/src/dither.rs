//! Quantisation for surfaces with fewer than eight bits per channel.

use ndarray::{Array3, Axis};

/// 4x4 Bayer threshold matrix, values 0..16.
const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Reduce colour channels to `bits` per channel in place.
///
/// With `ordered` set a Bayer pattern spreads the rounding error, which looks
/// better for a short-lived fast pass; otherwise values are rounded to the
/// nearest level. `origin` anchors the pattern to widget coordinates so
/// adjacent tiles line up. Eight or more bits is a no-op.
pub fn quantize(pixels: &mut Array3<u8>, bits: u8, ordered: bool, origin: (i32, i32)) {
    if bits >= 8 || bits == 0 {
        return;
    }
    let levels = (1u32 << bits) - 1;
    for (y, mut row) in pixels.axis_iter_mut(Axis(0)).enumerate() {
        let by = (origin.1 + y as i32).rem_euclid(4) as usize;
        for (x, mut px) in row.axis_iter_mut(Axis(0)).enumerate() {
            let bx = (origin.0 + x as i32).rem_euclid(4) as usize;
            // bias in [0, 1) of one quantisation step
            let bias = if ordered {
                (BAYER_4X4[by][bx] as u32 * 2 + 1) * 255 / 32
            } else {
                255 / 2
            };
            for c in 0..3 {
                let level = (px[c] as u32 * levels + bias) / 255;
                px[c] = (level.min(levels) * 255 / levels) as u8;
            }
        }
    }
}
