//! Gamma, brightness and contrast adjustments on RGBA8 pixels.
//!
//! Each adjustment is compiled into a 256-entry lookup table applied to the
//! colour channels; alpha is left untouched. Identity values skip the pass.

use ndarray::{Array3, Axis};
use rayon::prelude::*;

use crate::consts::{
    BRIGHTNESS_RANGE, BRIGHTNESS_STEP, CONTRAST_RANGE, CONTRAST_STEP, GAMMA_RANGE, GAMMA_STEP,
    PARALLEL_PIXEL_THRESHOLD,
};

/// Display adjustments. Percent-based integers; `(100, 0, 100)` is identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageAdjustments {
    gamma: i32,
    brightness: i32,
    contrast: i32,
}

impl Default for ImageAdjustments {
    fn default() -> Self {
        Self {
            gamma: 100,
            brightness: 0,
            contrast: 100,
        }
    }
}

impl ImageAdjustments {
    /// Out-of-range inputs are clamped.
    pub fn new(gamma: i32, brightness: i32, contrast: i32) -> Self {
        let mut adj = Self::default();
        adj.set_gamma(gamma);
        adj.set_brightness(brightness);
        adj.set_contrast(contrast);
        adj
    }

    pub fn gamma(&self) -> i32 {
        self.gamma
    }

    pub fn brightness(&self) -> i32 {
        self.brightness
    }

    pub fn contrast(&self) -> i32 {
        self.contrast
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_gamma(&mut self, gamma: i32) {
        self.gamma = gamma.clamp(GAMMA_RANGE.0, GAMMA_RANGE.1);
    }

    pub fn set_brightness(&mut self, brightness: i32) {
        self.brightness = brightness.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1);
    }

    pub fn set_contrast(&mut self, contrast: i32) {
        self.contrast = contrast.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1);
    }

    pub fn increase_gamma(&mut self) {
        self.set_gamma(self.gamma + GAMMA_STEP);
    }

    pub fn decrease_gamma(&mut self) {
        self.set_gamma(self.gamma - GAMMA_STEP);
    }

    pub fn increase_brightness(&mut self) {
        self.set_brightness(self.brightness + BRIGHTNESS_STEP);
    }

    pub fn decrease_brightness(&mut self) {
        self.set_brightness(self.brightness - BRIGHTNESS_STEP);
    }

    pub fn increase_contrast(&mut self) {
        self.set_contrast(self.contrast + CONTRAST_STEP);
    }

    pub fn decrease_contrast(&mut self) {
        self.set_contrast(self.contrast - CONTRAST_STEP);
    }

    /// Apply brightness, contrast and gamma, in that order.
    pub fn apply(&self, pixels: &mut Array3<u8>) {
        if self.brightness != 0 {
            apply_table(pixels, &brightness_table(self.brightness));
        }
        if self.contrast != 100 {
            apply_table(pixels, &contrast_table(self.contrast));
        }
        if self.gamma != 100 {
            apply_table(pixels, &gamma_table(self.gamma));
        }
    }
}

fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

pub fn brightness_table(brightness: i32) -> [u8; 256] {
    let delta = brightness * 255 / 100;
    std::array::from_fn(|v| clamp_u8(v as i32 + delta))
}

pub fn contrast_table(contrast: i32) -> [u8; 256] {
    std::array::from_fn(|v| clamp_u8((v as i32 - 127) * contrast / 100 + 127))
}

pub fn gamma_table(gamma: i32) -> [u8; 256] {
    let exponent = 100.0 / gamma as f64;
    std::array::from_fn(|v| clamp_u8(((v as f64 / 255.0).powf(exponent) * 255.0) as i32))
}

/// Map the RGB channels of every pixel through `table`.
fn apply_table(pixels: &mut Array3<u8>, table: &[u8; 256]) {
    let (h, w, _) = pixels.dim();
    let map_row = |mut row: ndarray::ArrayViewMut2<'_, u8>| {
        for mut px in row.axis_iter_mut(Axis(0)) {
            for c in 0..3 {
                px[c] = table[px[c] as usize];
            }
        }
    };
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        pixels.axis_iter_mut(Axis(0)).into_par_iter().for_each(map_row);
    } else {
        pixels.axis_iter_mut(Axis(0)).for_each(map_row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_table_saturates() {
        let t = brightness_table(100);
        assert_eq!(t[0], 255);
        let t = brightness_table(-100);
        assert_eq!(t[255], 0);
    }

    #[test]
    fn test_contrast_table_keeps_midpoint() {
        let t = contrast_table(300);
        assert_eq!(t[127], 127);
        assert_eq!(t[0], 0);
        assert_eq!(t[255], 255);
    }

    #[test]
    fn test_gamma_table_endpoints() {
        let t = gamma_table(200);
        assert_eq!(t[0], 0);
        assert_eq!(t[255], 255);
        assert!(t[64] > 64, "gamma > 100 brightens midtones");
    }
}
