//! Mapping between image space and widget space.
//!
//! Image space has the image's top-left pixel at `(0, 0)`. Widget space is
//! the scrollable content area; the image sits at `offset` (non-zero when the
//! zoomed image is smaller than the viewport and gets centered) and is scaled
//! by `zoom`.
//!
//! Conversions round to the nearest integer, so converting a rect to image
//! space and back may shrink it. [`ViewTransform::widget_to_image_bounding`]
//! pads the result so that the round trip always covers the original.
//!
//! Width and height are never converted on their own: rects are converted
//! through the top-left corner and the point one past the bottom-right
//! corner, since rounding both corners of a rect independently can lose a
//! row or column.

use crate::geom::{Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub zoom: f64,
    pub offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Point::default(),
        }
    }
}

impl ViewTransform {
    pub fn new(zoom: f64, offset: Point) -> Self {
        Self { zoom, offset }
    }

    pub fn is_identity_zoom(&self) -> bool {
        self.zoom == 1.0
    }

    pub fn image_to_widget_x(&self, x: i32) -> i32 {
        if self.is_identity_zoom() {
            return x + self.offset.x;
        }
        (x as f64 * self.zoom).round() as i32 + self.offset.x
    }

    pub fn image_to_widget_y(&self, y: i32) -> i32 {
        if self.is_identity_zoom() {
            return y + self.offset.y;
        }
        (y as f64 * self.zoom).round() as i32 + self.offset.y
    }

    pub fn widget_to_image_x(&self, x: i32) -> i32 {
        if self.is_identity_zoom() {
            return x - self.offset.x;
        }
        ((x - self.offset.x) as f64 / self.zoom).round() as i32
    }

    pub fn widget_to_image_y(&self, y: i32) -> i32 {
        if self.is_identity_zoom() {
            return y - self.offset.y;
        }
        ((y - self.offset.y) as f64 / self.zoom).round() as i32
    }

    pub fn image_to_widget(&self, p: Point) -> Point {
        Point::new(self.image_to_widget_x(p.x), self.image_to_widget_y(p.y))
    }

    pub fn widget_to_image(&self, p: Point) -> Point {
        Point::new(self.widget_to_image_x(p.x), self.widget_to_image_y(p.y))
    }

    pub fn image_to_widget_rect(&self, r: &Rect) -> Rect {
        let one = Point::new(1, 1);
        Rect::from_corners(
            self.image_to_widget(r.top_left()),
            self.image_to_widget(r.bottom_right() + one) - one,
        )
    }

    pub fn widget_to_image_rect(&self, r: &Rect) -> Rect {
        let one = Point::new(1, 1);
        Rect::from_corners(
            self.widget_to_image(r.top_left()),
            self.widget_to_image(r.bottom_right() + one) - one,
        )
    }

    /// Convert `r` to image space and grow it by `extra` pixels plus one
    /// source pixel's worth of widget pixels on every side, so that
    /// `image_to_widget_rect` of the result contains `r`.
    pub fn widget_to_image_bounding(&self, r: &Rect, extra: i32) -> Rect {
        let pad = extra
            + if self.is_identity_zoom() {
                0
            } else {
                (1.0 / self.zoom).ceil() as i32
            };
        self.widget_to_image_rect(r).adjusted(-pad, -pad, pad, pad)
    }
}
