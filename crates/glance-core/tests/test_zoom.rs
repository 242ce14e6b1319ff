use approx::assert_abs_diff_eq;
use glance_core::config::AutoZoomMode;
use glance_core::geom::{Point, Size};
use glance_core::zoom::{
    clamp_zoom, content_size, image_offset, step_zoom, zoom_to_fit, zoom_to_height,
    zoom_to_width, ScrollBarMode, ZoomController, ZoomGeometry,
};

fn geometry(view: (i32, i32), image: Option<(i32, i32)>, scrollbars: ScrollBarMode) -> ZoomGeometry {
    ZoomGeometry {
        view: Size::new(view.0, view.1),
        image: image.map(|(w, h)| Size::new(w, h)),
        scrollbars,
        scrollbar_thickness: 16,
    }
}

#[test]
fn test_fit_shrinks_large_image() {
    let g = geometry((200, 200), Some((400, 200)), ScrollBarMode::AlwaysOff);
    assert_abs_diff_eq!(zoom_to_fit(&g, false), 0.5, epsilon = 1e-9);
}

#[test]
fn test_fit_keeps_small_image_unless_enlarged() {
    let g = geometry((200, 200), Some((50, 50)), ScrollBarMode::AlwaysOff);
    assert_abs_diff_eq!(zoom_to_fit(&g, false), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(zoom_to_fit(&g, true), 4.0, epsilon = 1e-9);
}

#[test]
fn test_auto_zoom_without_image_is_identity() {
    let g = geometry((200, 200), None, ScrollBarMode::Auto);
    assert_eq!(zoom_to_fit(&g, true), 1.0);
    assert_eq!(zoom_to_width(&g), 1.0);
    assert_eq!(zoom_to_height(&g), 1.0);
}

#[test]
fn test_width_accounts_for_vertical_scrollbar() {
    let auto = geometry((200, 300), Some((100, 1000)), ScrollBarMode::Auto);
    assert_abs_diff_eq!(zoom_to_width(&auto), 1.84, epsilon = 1e-9);
    let off = geometry((200, 300), Some((100, 1000)), ScrollBarMode::AlwaysOff);
    assert_abs_diff_eq!(zoom_to_width(&off), 2.0, epsilon = 1e-9);
}

#[test]
fn test_height_accounts_for_horizontal_scrollbar() {
    let auto = geometry((300, 200), Some((1000, 100)), ScrollBarMode::Auto);
    assert_abs_diff_eq!(zoom_to_height(&auto), 1.84, epsilon = 1e-9);
    // fits without overflowing, no scrollbar needed
    let fits = geometry((300, 200), Some((100, 100)), ScrollBarMode::Auto);
    assert_abs_diff_eq!(zoom_to_height(&fits), 2.0, epsilon = 1e-9);
}

#[test]
fn test_step_zoom_above_one() {
    assert_abs_diff_eq!(step_zoom(2.0, true, &[]), 2.5, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(2.0, false, &[]), 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(1.1, true, &[]), 1.5, epsilon = 1e-9);
}

#[test]
fn test_step_zoom_below_one_is_reciprocal() {
    assert_abs_diff_eq!(step_zoom(1.0, false, &[]), 1.0 / 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(0.5, false, &[]), 0.4, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(0.5, true, &[]), 1.0 / 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(0.9, true, &[]), 1.0, epsilon = 1e-9);
}

#[test]
fn test_step_zoom_stops_at_targets() {
    assert_abs_diff_eq!(step_zoom(1.1, true, &[1.2]), 1.2, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(0.9, true, &[0.95]), 0.95, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(2.0, false, &[1.8, 0.3]), 1.8, epsilon = 1e-9);
    // targets behind the current zoom are ignored
    assert_abs_diff_eq!(step_zoom(2.0, true, &[1.8]), 2.5, epsilon = 1e-9);
}

#[test]
fn test_step_zoom_lands_on_one_before_width_target() {
    // 1:1 comes before a fit-to-width target of 1.2
    assert_abs_diff_eq!(step_zoom(0.9, true, &[1.2]), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(step_zoom(1.0, true, &[1.2]), 1.2, epsilon = 1e-9);
}

#[test]
fn test_clamp_zoom() {
    assert_eq!(clamp_zoom(100.0), 16.0);
    assert_eq!(clamp_zoom(0.001), 1.0 / 16.0);
    assert_eq!(clamp_zoom(0.0), 1.0);
    assert_eq!(clamp_zoom(f64::NAN), 1.0);
}

#[test]
fn test_image_offset_centers_small_image() {
    let g = geometry((200, 100), Some((50, 40)), ScrollBarMode::Auto);
    assert_eq!(image_offset(&g, 1.0), Point::new(75, 30));
    // wider than the view: no horizontal centering, and the scrollbar eats height
    assert_eq!(image_offset(&g, 5.0), Point::new(0, 0));
    let tall = geometry((200, 100), Some((20, 200)), ScrollBarMode::Auto);
    assert_eq!(image_offset(&tall, 1.0), Point::new(82, 0));
}

#[test]
fn test_content_size() {
    assert_eq!(content_size(Some(Size::new(100, 50)), 1.5), Size::new(150, 75));
    assert_eq!(content_size(None, 2.0), Size::default());
}

#[test]
fn test_auto_mode_restores_manual_zoom_and_center() {
    let g = geometry((200, 200), Some((400, 200)), ScrollBarMode::Auto);
    let mut ctl = ZoomController::new(AutoZoomMode::None, false);
    ctl.store_zoom(2.0);

    let (zoom, center) = ctl.set_auto_mode(AutoZoomMode::Fit, true, Point::new(10, 20), &g);
    assert_abs_diff_eq!(zoom, 0.5, epsilon = 1e-9);
    assert_eq!(center, None);
    assert_eq!(ctl.auto_mode(), AutoZoomMode::Fit);
    assert_eq!(ctl.scrollbar_mode(), ScrollBarMode::AlwaysOff);

    let (zoom, center) = ctl.set_auto_mode(AutoZoomMode::Fit, false, Point::default(), &g);
    assert_eq!(zoom, 2.0);
    assert_eq!(center, Some(Point::new(10, 20)));
    assert_eq!(ctl.auto_mode(), AutoZoomMode::None);
}

#[test]
fn test_disabling_inactive_mode_keeps_zoom() {
    let g = geometry((200, 200), Some((400, 200)), ScrollBarMode::Auto);
    let mut ctl = ZoomController::new(AutoZoomMode::None, false);
    ctl.store_zoom(3.0);
    let (zoom, center) = ctl.set_auto_mode(AutoZoomMode::Width, false, Point::new(5, 5), &g);
    assert_eq!(zoom, 3.0);
    assert_eq!(center, None);
}

#[test]
fn test_manual_zoom_overrides_auto_mode() {
    let mut ctl = ZoomController::new(AutoZoomMode::Fit, false);
    assert!(ctl.is_auto(false));
    ctl.note_manual_zoom();
    assert!(ctl.manual_override());
    assert!(!ctl.is_auto(false));
    assert!(ctl.is_auto(true));
    assert_eq!(ctl.scrollbar_mode(), ScrollBarMode::Auto);

    // a new image drops the override and re-applies the mode
    let g = geometry((200, 200), Some((400, 200)), ScrollBarMode::Auto);
    let zoom = ctl.image_size_changed(&g);
    assert!(!ctl.manual_override());
    assert_abs_diff_eq!(zoom.unwrap(), 0.5, epsilon = 1e-9);
}

#[test]
fn test_lock_zoom_keeps_zoom_across_images() {
    let g = geometry((200, 200), Some((400, 200)), ScrollBarMode::Auto);
    let mut ctl = ZoomController::new(AutoZoomMode::Fit, true);
    // lock is ignored while an auto mode is configured
    assert!(!ctl.lock_zoom());

    ctl.set_lock_zoom(true);
    assert_eq!(ctl.auto_mode(), AutoZoomMode::None);
    ctl.store_zoom(3.0);
    assert_eq!(ctl.image_size_changed(&g), None);

    ctl.set_lock_zoom(false);
    assert_eq!(ctl.image_size_changed(&g), Some(1.0));
}

#[test]
fn test_enabling_auto_mode_clears_lock() {
    let g = geometry((200, 200), Some((400, 200)), ScrollBarMode::Auto);
    let mut ctl = ZoomController::new(AutoZoomMode::None, true);
    assert!(ctl.lock_zoom());
    ctl.set_auto_mode(AutoZoomMode::Height, true, Point::default(), &g);
    assert!(!ctl.lock_zoom());
}

#[test]
fn test_can_zoom_limits() {
    let mut ctl = ZoomController::new(AutoZoomMode::None, false);
    ctl.store_zoom(16.0);
    assert!(!ctl.can_zoom_in());
    assert!(ctl.can_zoom_out());
    ctl.store_zoom(1.0 / 16.0);
    assert!(!ctl.can_zoom_out());

    let auto = ZoomController::new(AutoZoomMode::Fit, false);
    assert!(auto.can_zoom_in());
    assert!(auto.can_zoom_out());
}
