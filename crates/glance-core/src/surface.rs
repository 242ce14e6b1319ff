//! The seam between the image view and whatever toolkit shows its pixels.
//!
//! All rects and points passed to a [`Surface`] are viewport-local: (0, 0)
//! is the top-left visible pixel regardless of the scroll position.

use image::{Rgba, RgbaImage};
use ndarray::Array3;

use crate::geom::{Rect, Size};

pub trait Surface {
    /// Copy a finished RGBA buffer to `target`'s top-left, clipped to the viewport.
    fn blit(&mut self, target: Rect, pixels: &Array3<u8>);

    /// Fill `rect` with the background colour.
    fn erase(&mut self, rect: Rect, color: [u8; 3]);

    /// Ask the host to call back with a paint event covering `rect`.
    fn request_repaint(&mut self, rect: Rect);

    /// The scrollable content changed size.
    fn resize_contents(&mut self, size: Size);

    /// Shift already painted pixels after the view scrolled by `(dx, dy)`.
    /// Returns false when the surface cannot, in which case the whole
    /// viewport is repainted.
    fn scroll_contents(&mut self, _dx: i32, _dy: i32) -> bool {
        false
    }

    /// Colour depth of the output; below 8 the view dithers.
    fn bits_per_channel(&self) -> u8 {
        8
    }
}

/// In-memory [`Surface`]: an RGBA framebuffer plus a log of repaint requests.
pub struct FrameSurface {
    frame: RgbaImage,
    requests: Vec<Rect>,
    contents: Size,
    bits: u8,
    /// Set whenever pixels change; cleared by `take_dirty`.
    dirty: bool,
}

impl FrameSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            requests: Vec::new(),
            contents: Size::default(),
            bits: 8,
            dirty: true,
        }
    }

    pub fn with_bits_per_channel(mut self, bits: u8) -> Self {
        self.bits = bits;
        self
    }

    /// Resize the framebuffer. The old contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.frame.dimensions() != (width, height) {
            self.frame = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
            self.dirty = true;
        }
    }

    /// True when the framebuffer changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn size(&self) -> Size {
        Size::new(self.frame.width() as i32, self.frame.height() as i32)
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn into_frame(self) -> RgbaImage {
        self.frame
    }

    /// Size last announced through `resize_contents`.
    pub fn contents_size(&self) -> Size {
        self.contents
    }

    pub fn repaint_requests(&self) -> &[Rect] {
        &self.requests
    }

    /// Hand pending repaint requests to the host loop.
    pub fn take_repaint_requests(&mut self) -> Vec<Rect> {
        std::mem::take(&mut self.requests)
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }
}

impl Surface for FrameSurface {
    fn blit(&mut self, target: Rect, pixels: &Array3<u8>) {
        let (h, w, _) = pixels.dim();
        let placed = Rect::new(target.x, target.y, w as i32, h as i32);
        let clip = placed.intersect(&self.bounds());
        if clip.is_empty() {
            return;
        }
        for y in clip.top()..=clip.bottom() {
            let sy = (y - placed.y) as usize;
            for x in clip.left()..=clip.right() {
                let sx = (x - placed.x) as usize;
                let px = Rgba([
                    pixels[[sy, sx, 0]],
                    pixels[[sy, sx, 1]],
                    pixels[[sy, sx, 2]],
                    255,
                ]);
                self.frame.put_pixel(x as u32, y as u32, px);
            }
        }
        self.dirty = true;
    }

    fn erase(&mut self, rect: Rect, color: [u8; 3]) {
        let clip = rect.intersect(&self.bounds());
        if clip.is_empty() {
            return;
        }
        let px = Rgba([color[0], color[1], color[2], 255]);
        for y in clip.top()..=clip.bottom() {
            for x in clip.left()..=clip.right() {
                self.frame.put_pixel(x as u32, y as u32, px);
            }
        }
        self.dirty = true;
    }

    fn request_repaint(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.requests.push(rect);
        }
    }

    fn resize_contents(&mut self, size: Size) {
        self.contents = size;
    }

    fn scroll_contents(&mut self, dx: i32, dy: i32) -> bool {
        let (w, h) = (self.frame.width() as i32, self.frame.height() as i32);
        let mut shifted = RgbaImage::from_pixel(w as u32, h as u32, Rgba([0, 0, 0, 255]));
        for y in 0..h {
            let sy = y + dy;
            if !(0..h).contains(&sy) {
                continue;
            }
            for x in 0..w {
                let sx = x + dx;
                if (0..w).contains(&sx) {
                    shifted.put_pixel(x as u32, y as u32, *self.frame.get_pixel(sx as u32, sy as u32));
                }
            }
        }
        self.frame = shifted;
        self.dirty = true;
        true
    }

    fn bits_per_channel(&self) -> u8 {
        self.bits
    }
}
