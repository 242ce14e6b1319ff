use image::{DynamicImage, RgbaImage};
use ndarray::{s, Array3, ArrayView3};

use crate::consts::RGBA_CHANNELS;
use crate::error::{GlanceError, Result};
use crate::geom::{Rect, Size};

/// A decoded image: RGBA8 pixels, row-major, shape = (height, width, 4).
#[derive(Clone, Debug)]
pub struct Raster {
    pub data: Array3<u8>,
    /// True when the source carried an alpha channel.
    pub has_alpha: bool,
}

impl Raster {
    pub fn new(data: Array3<u8>, has_alpha: bool) -> Self {
        Self { data, has_alpha }
    }

    /// A fully transparent-black raster (alpha flagged) or opaque-black raster.
    pub fn blank(width: usize, height: usize, has_alpha: bool) -> Self {
        let mut data = Array3::<u8>::zeros((height, width, RGBA_CHANNELS));
        if !has_alpha {
            data.slice_mut(s![.., .., 3]).fill(255);
        }
        Self { data, has_alpha }
    }

    /// Build a raster from packed RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>, has_alpha: bool) -> Result<Self> {
        let shape = (height as usize, width as usize, RGBA_CHANNELS);
        let data = Array3::from_shape_vec(shape, pixels)
            .map_err(|_| GlanceError::InvalidDimensions { width, height })?;
        Ok(Self { data, has_alpha })
    }

    pub fn from_dynamic(img: DynamicImage) -> Result<Self> {
        let has_alpha = img.color().has_alpha();
        let rgba = img.into_rgba8();
        let (w, h) = rgba.dimensions();
        if w == 0 || h == 0 {
            return Err(GlanceError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Self::from_rgba(w, h, rgba.into_raw(), has_alpha)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as i32, self.height() as i32)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    /// Zero-copy view over `rect`, clipped to the raster bounds.
    pub fn view(&self, rect: Rect) -> ArrayView3<'_, u8> {
        let r = rect.intersect(&self.bounds());
        if r.is_empty() {
            return self.data.slice(s![0..0, 0..0, ..]);
        }
        let (x0, y0) = (r.x as usize, r.y as usize);
        let (x1, y1) = (x0 + r.width as usize, y0 + r.height as usize);
        self.data.slice(s![y0..y1, x0..x1, ..])
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ]
    }

    /// Copy into an `image` buffer, e.g. for saving.
    pub fn to_rgba_image(&self) -> RgbaImage {
        view_to_rgba_image(&self.data.view())
    }
}

/// Materialize a (possibly strided) view as a packed `RgbaImage`.
pub fn view_to_rgba_image(view: &ArrayView3<'_, u8>) -> RgbaImage {
    let (h, w, _) = view.dim();
    let mut pixels = Vec::with_capacity(h * w * RGBA_CHANNELS);
    pixels.extend(view.iter().copied());
    RgbaImage::from_raw(w as u32, h as u32, pixels).unwrap_or_default()
}

/// Convert a packed `RgbaImage` into an owned pixel array.
pub fn rgba_image_to_array(img: RgbaImage) -> Array3<u8> {
    let (w, h) = img.dimensions();
    Array3::from_shape_vec((h as usize, w as usize, RGBA_CHANNELS), img.into_raw())
        .unwrap_or_else(|_| Array3::zeros((0, 0, RGBA_CHANNELS)))
}
