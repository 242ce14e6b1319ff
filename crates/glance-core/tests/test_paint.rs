#[allow(dead_code)]
mod common;

use glance_core::adjust::ImageAdjustments;
use glance_core::geom::{Point, Rect};
use glance_core::governor::PaintKind;
use glance_core::paint::{render, PaintContext};
use glance_core::paint_queue::{PaintPass, PendingPaint};
use glance_core::raster::Raster;
use glance_core::region::Region;
use glance_core::scale::SmoothAlgorithm;
use glance_core::transform::ViewTransform;

const BG: [u8; 3] = [1, 2, 3];

fn context<'a>(
    image: &'a Raster,
    valid: &'a Region,
    adjustments: &'a ImageAdjustments,
    zoom: f64,
    delayed: bool,
) -> PaintContext<'a> {
    PaintContext {
        image,
        valid_area: valid,
        transform: ViewTransform::new(zoom, Point::default()),
        smooth_algorithm: SmoothAlgorithm::Normal,
        delayed_smoothing: delayed,
        adjustments,
        background: BG,
        bits_per_channel: 8,
    }
}

fn rgb(pixels: &ndarray::Array3<u8>, x: usize, y: usize) -> [u8; 3] {
    [pixels[[y, x, 0]], pixels[[y, x, 1]], pixels[[y, x, 2]]]
}

#[test]
fn test_transparent_pixels_show_checkerboard() {
    let image = Raster::blank(32, 32, true);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 1.0, false);
    // a 2x2 block straddling a square corner
    let out = render(&ctx, Rect::new(15, 15, 2, 2), false);
    let pixels = out.pixels.unwrap();
    assert_eq!(rgb(&pixels, 0, 0), [128; 3]);
    assert_eq!(rgb(&pixels, 1, 0), [192; 3]);
    assert_eq!(rgb(&pixels, 0, 1), [192; 3]);
    assert_eq!(rgb(&pixels, 1, 1), [128; 3]);
    assert_eq!(pixels[[0, 0, 3]], 255);
}

#[test]
fn test_half_transparent_blends_with_checker() {
    let image = common::solid_raster(4, 4, [255, 0, 0, 128]);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 1.0, false);
    let pixels = render(&ctx, Rect::new(0, 0, 1, 1), false).pixels.unwrap();
    // (255*128 + 127*128) / 255 and (0*128 + 127*128) / 255 over a dark square
    assert_eq!(rgb(&pixels, 0, 0), [191, 63, 63]);
}

#[test]
fn test_plain_paint_copies_pixels() {
    let image = common::gradient_raster(64, 64);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 1.0, false);
    let out = render(&ctx, Rect::new(10, 20, 8, 8), false);
    assert_eq!(out.kind, PaintKind::Plain);
    assert!(out.follow_ups.is_empty());
    let pixels = out.pixels.unwrap();
    assert_eq!(pixels.dim(), (8, 8, 4));
    assert_eq!(rgb(&pixels, 0, 0), [10, 20, 50]);
    assert_eq!(rgb(&pixels, 7, 7), [17, 27, 50]);
}

#[test]
fn test_area_outside_image_gets_background() {
    let image = common::solid_raster(10, 10, [200, 200, 200, 255]);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 1.0, false);
    let pixels = render(&ctx, Rect::new(5, 5, 10, 10), false).pixels.unwrap();
    assert_eq!(rgb(&pixels, 0, 0), [200; 3]);
    assert_eq!(rgb(&pixels, 9, 9), BG);
}

#[test]
fn test_no_valid_area_erases() {
    let image = common::solid_raster(10, 10, [200, 200, 200, 255]);
    let valid = Region::new();
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 1.0, false);
    let out = render(&ctx, Rect::new(0, 0, 10, 10), false);
    assert!(out.pixels.is_none());
    assert!(out.follow_ups.is_empty());
}

#[test]
fn test_disconnected_valid_area_paints_first_and_requeues_rest() {
    let image = common::solid_raster(100, 100, [90, 90, 90, 255]);
    let mut valid = Region::from_rect(Rect::new(0, 0, 100, 10));
    valid.add_rect(Rect::new(0, 50, 100, 10));
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 1.0, false);
    let out = render(&ctx, Rect::new(0, 0, 100, 100), false);
    assert_eq!(
        out.follow_ups,
        vec![PendingPaint::new(Rect::new(0, 50, 100, 10), PaintPass::Normal)]
    );
    let pixels = out.pixels.unwrap();
    assert_eq!(rgb(&pixels, 0, 0), [90; 3]);
    // undecoded band stays background
    assert_eq!(rgb(&pixels, 0, 30), BG);
}

#[test]
fn test_valid_rows_beside_clip_are_not_requeued() {
    let image = common::gradient_raster(40, 40);
    let mut valid = Region::from_rect(Rect::new(0, 0, 40, 11));
    valid.add_rect(Rect::new(0, 12, 40, 28));
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 2.0, false);
    // widget rows 22..=23 show image row 11, which is missing
    let out = render(&ctx, Rect::new(0, 22, 80, 2), false);
    assert!(out.pixels.is_none());
    assert!(out.follow_ups.is_empty());
}

#[test]
fn test_requeued_piece_is_clipped_to_request() {
    let image = common::gradient_raster(40, 40);
    let mut valid = Region::from_rect(Rect::new(0, 0, 40, 10));
    valid.add_rect(Rect::new(0, 11, 40, 29));
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 2.0, false);
    let out = render(&ctx, Rect::new(0, 0, 80, 60), false);
    assert_eq!(
        out.follow_ups,
        vec![PendingPaint::new(Rect::new(0, 22, 80, 38), PaintPass::Normal)]
    );
    let pixels = out.pixels.unwrap();
    assert_eq!(rgb(&pixels, 0, 20), BG);
    assert_eq!(rgb(&pixels, 0, 22), BG);

    let rest = render(&ctx, Rect::new(0, 22, 80, 38), false);
    assert!(rest.follow_ups.is_empty());
    let pixels = rest.pixels.unwrap();
    assert_eq!(pixels[[18, 10, 2]], 50);
}

#[test]
fn test_fast_pass_schedules_smoothing() {
    let image = common::gradient_raster(50, 50);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 2.0, true);
    let clip = Rect::new(0, 0, 40, 40);
    let out = render(&ctx, clip, false);
    assert_eq!(out.kind, PaintKind::Scaled);
    assert_eq!(out.follow_ups, vec![PendingPaint::new(clip, PaintPass::Smooth)]);

    let second = render(&ctx, clip, true);
    assert_eq!(second.kind, PaintKind::Smoothed);
    assert!(second.follow_ups.is_empty());
}

#[test]
fn test_without_delayed_smoothing_smooths_immediately() {
    let image = common::gradient_raster(50, 50);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 0.5, false);
    let out = render(&ctx, Rect::new(0, 0, 25, 25), false);
    assert_eq!(out.kind, PaintKind::Smoothed);
    assert!(out.follow_ups.is_empty());
    assert_eq!(out.pixels.unwrap().dim(), (25, 25, 4));
}

#[test]
fn test_zoom_two_nearest_repeats_pixels() {
    let image = common::gradient_raster(8, 8);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::default();
    let ctx = context(&image, &valid, &adj, 2.0, true);
    let pixels = render(&ctx, Rect::new(0, 0, 16, 16), false).pixels.unwrap();
    assert_eq!(rgb(&pixels, 0, 0), rgb(&pixels, 1, 1));
    assert_eq!(rgb(&pixels, 2, 0), [1, 0, 50]);
    assert_eq!(rgb(&pixels, 15, 15), [7, 7, 50]);
}

#[test]
fn test_adjustments_are_applied() {
    let image = common::solid_raster(4, 4, [100, 100, 100, 255]);
    let valid = Region::from_rect(image.bounds());
    let adj = ImageAdjustments::new(100, 20, 100);
    let ctx = context(&image, &valid, &adj, 1.0, false);
    let pixels = render(&ctx, Rect::new(0, 0, 4, 4), false).pixels.unwrap();
    // +20% of 255 = +51
    assert_eq!(rgb(&pixels, 0, 0), [151; 3]);
}
