use ndarray::{Array3, Axis};
use rayon::prelude::*;

use crate::consts::{CHECKER_DARK, CHECKER_LIGHT, CHECKER_SIZE, PARALLEL_PIXEL_THRESHOLD};
use crate::geom::Point;

/// Checkerboard grey at image-absolute position `(x, y)`.
pub fn checker_value(x: i32, y: i32) -> u8 {
    if ((x ^ y) & CHECKER_SIZE) != 0 {
        CHECKER_LIGHT
    } else {
        CHECKER_DARK
    }
}

/// Composite translucent pixels over a two-tone checkerboard and make the
/// result opaque. `origin` is the absolute position of `pixels[0, 0]`, so
/// squares stay aligned across separately painted tiles.
pub fn composite_checkerboard(pixels: &mut Array3<u8>, origin: Point) {
    let (h, w, _) = pixels.dim();
    let blend_row = |(y, mut row): (usize, ndarray::ArrayViewMut2<'_, u8>)| {
        let ay = origin.y + y as i32;
        for (x, mut px) in row.axis_iter_mut(Axis(0)).enumerate() {
            let alpha = px[3] as u32;
            if alpha < 255 {
                let checker = checker_value(origin.x + x as i32, ay) as u32;
                let under = (255 - alpha) * checker;
                for c in 0..3 {
                    px[c] = ((px[c] as u32 * alpha + under) / 255) as u8;
                }
            }
            px[3] = 255;
        }
    };
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        pixels
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(blend_row);
    } else {
        pixels.axis_iter_mut(Axis(0)).enumerate().for_each(blend_row);
    }
}
