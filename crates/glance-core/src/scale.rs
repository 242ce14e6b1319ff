//! Resampling of a source view to the widget size of a paint.

use image::imageops::{self, FilterType};
use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::consts::{PARALLEL_PIXEL_THRESHOLD, RGBA_CHANNELS};
use crate::raster::{rgba_image_to_array, view_to_rgba_image};

/// Resampling quality. Only affects how pixels look, never which pixels are painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothAlgorithm {
    /// Nearest neighbour.
    None,
    /// Bilinear (triangle filter).
    Fast,
    /// Bicubic (Catmull-Rom).
    #[default]
    Normal,
    /// Lanczos, 3 lobes.
    Best,
}

impl std::fmt::Display for SmoothAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Fast => write!(f, "Fast"),
            Self::Normal => write!(f, "Normal"),
            Self::Best => write!(f, "Best"),
        }
    }
}

impl SmoothAlgorithm {
    /// Filter radius in source pixels at 1:1.
    fn support(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Fast => 1.0,
            Self::Normal => 2.0,
            Self::Best => 3.0,
        }
    }

    fn filter(self) -> Option<FilterType> {
        match self {
            Self::None => None,
            Self::Fast => Some(FilterType::Triangle),
            Self::Normal => Some(FilterType::CatmullRom),
            Self::Best => Some(FilterType::Lanczos3),
        }
    }
}

/// Source pixels a resampling kernel reads beyond the painted area, per side.
pub fn extra_scale_pixels(algorithm: SmoothAlgorithm, zoom: f64) -> i32 {
    let support = algorithm.support();
    if zoom == 1.0 || support == 0.0 {
        return 0;
    }
    let scale = (1.0 / zoom).max(1.0);
    (support * scale).floor() as i32 + 1
}

/// Resample `src` to `width x height`.
pub fn scale(
    src: &ArrayView3<'_, u8>,
    width: usize,
    height: usize,
    algorithm: SmoothAlgorithm,
) -> Array3<u8> {
    let (sh, sw, _) = src.dim();
    if sh == 0 || sw == 0 || width == 0 || height == 0 {
        return Array3::zeros((height, width, RGBA_CHANNELS));
    }
    match algorithm.filter() {
        None => scale_nearest(src, width, height),
        Some(filter) => {
            let img = view_to_rgba_image(src);
            let resized = imageops::resize(&img, width as u32, height as u32, filter);
            rgba_image_to_array(resized)
        }
    }
}

/// Source index sampled for destination index `d` when mapping `src_len` onto `dst_len`.
fn nearest_index(d: usize, src_len: usize, dst_len: usize) -> usize {
    let pos = ((2 * d + 1) * src_len) / (2 * dst_len);
    pos.min(src_len - 1)
}

fn scale_nearest(src: &ArrayView3<'_, u8>, width: usize, height: usize) -> Array3<u8> {
    let (sh, sw, _) = src.dim();
    let cols: Vec<usize> = (0..width).map(|x| nearest_index(x, sw, width)).collect();
    let mut out = Array3::<u8>::zeros((height, width, RGBA_CHANNELS));

    let fill_row = |y: usize, mut row: ndarray::ArrayViewMut2<'_, u8>| {
        let sy = nearest_index(y, sh, height);
        for (x, &sx) in cols.iter().enumerate() {
            for c in 0..RGBA_CHANNELS {
                row[[x, c]] = src[[sy, sx, c]];
            }
        }
    };

    if width * height >= PARALLEL_PIXEL_THRESHOLD {
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    } else {
        for (y, row) in out.axis_iter_mut(Axis(0)).enumerate() {
            fill_row(y, row);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_index_upscale_doubles() {
        let picks: Vec<usize> = (0..4).map(|d| nearest_index(d, 2, 4)).collect();
        assert_eq!(picks, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_nearest_index_downscale_centers() {
        let picks: Vec<usize> = (0..2).map(|d| nearest_index(d, 4, 2)).collect();
        assert_eq!(picks, vec![1, 3]);
    }
}
