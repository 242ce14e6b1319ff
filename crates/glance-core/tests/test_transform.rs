use proptest::prelude::*;

use glance_core::geom::{Point, Rect};
use glance_core::transform::ViewTransform;

#[test]
fn test_identity_zoom_is_plain_translation() {
    let t = ViewTransform::new(1.0, Point::new(7, -3));
    assert_eq!(t.image_to_widget(Point::new(10, 20)), Point::new(17, 17));
    assert_eq!(t.widget_to_image(Point::new(17, 17)), Point::new(10, 20));
}

#[test]
fn test_rect_conversion_uses_exclusive_corner() {
    // at 1.5x each image pixel covers 1 or 2 widget pixels; converting the
    // inclusive corner directly would lose the last column
    let t = ViewTransform::new(1.5, Point::default());
    let r = t.image_to_widget_rect(&Rect::new(0, 0, 3, 3));
    assert_eq!(r, Rect::new(0, 0, 5, 5));
}

#[test]
fn test_zoom_two_doubles_rect() {
    let t = ViewTransform::new(2.0, Point::new(10, 10));
    let r = t.image_to_widget_rect(&Rect::new(1, 2, 3, 4));
    assert_eq!(r, Rect::new(12, 14, 6, 8));
    assert_eq!(t.widget_to_image_rect(&r), Rect::new(1, 2, 3, 4));
}

#[test]
fn test_bounding_pads_by_extra_plus_one_source_pixel() {
    let t = ViewTransform::new(0.5, Point::default());
    let r = t.widget_to_image_bounding(&Rect::new(10, 10, 10, 10), 3);
    // image rect (20,20)-(39,39), padded by 3 + ceil(1/0.5) = 5
    assert_eq!(r, Rect::new(15, 15, 30, 30));
}

#[test]
fn test_bounding_at_identity_pads_by_extra_only() {
    let t = ViewTransform::new(1.0, Point::new(4, 4));
    let r = t.widget_to_image_bounding(&Rect::new(4, 4, 10, 10), 2);
    assert_eq!(r, Rect::new(-2, -2, 14, 14));
}

proptest! {
    #[test]
    fn bounding_round_trip_covers_original(
        x in -2000i32..2000,
        y in -2000i32..2000,
        w in 1i32..500,
        h in 1i32..500,
        zoom_step in -8i32..=8,
        frac in 0.0f64..1.0,
        ox in -300i32..300,
        oy in -300i32..300,
        extra in 0i32..6,
    ) {
        // zoom spans [1/16, 16] on a log scale
        let zoom = 2f64.powf((zoom_step as f64 + frac) / 2.0).clamp(1.0 / 16.0, 16.0);
        let t = ViewTransform::new(zoom, Point::new(ox, oy));
        let original = Rect::new(x, y, w, h);
        let image = t.widget_to_image_bounding(&original, extra);
        let back = t.image_to_widget_rect(&image);
        prop_assert!(back.contains_rect(&original), "zoom={} back={} original={}", zoom, back, original);
    }

    #[test]
    fn identity_zoom_has_no_drift(
        px in -100_000i32..100_000,
        py in -100_000i32..100_000,
        ox in -5000i32..5000,
        oy in -5000i32..5000,
    ) {
        let t = ViewTransform::new(1.0, Point::new(ox, oy));
        let p = Point::new(px, py);
        prop_assert_eq!(t.image_to_widget(p), Point::new(px + ox, py + oy));
        prop_assert_eq!(t.widget_to_image(t.image_to_widget(p)), p);
    }
}
