use glance_core::geom::Rect;
use glance_core::paint_queue::{PaintPass, PaintTracker, PendingPaint};

#[test]
fn test_duplicate_request_is_enqueued_once() {
    let mut tracker = PaintTracker::new();
    let rect = Rect::new(0, 0, 50, 50);
    assert!(tracker.request_repaint(rect, PaintPass::Normal));
    let region_after_one = tracker.pending_region(PaintPass::Normal).clone();
    assert!(!tracker.request_repaint(rect, PaintPass::Normal));
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.pending_region(PaintPass::Normal), &region_after_one);
}

#[test]
fn test_normal_pass_drains_before_smooth() {
    for normal_first in [true, false] {
        let mut tracker = PaintTracker::new();
        let a = Rect::new(0, 500, 10, 10);
        let b = Rect::new(0, 0, 10, 10);
        if normal_first {
            tracker.request_repaint(a, PaintPass::Normal);
            tracker.request_repaint(b, PaintPass::Smooth);
        } else {
            tracker.request_repaint(b, PaintPass::Smooth);
            tracker.request_repaint(a, PaintPass::Normal);
        }
        assert_eq!(
            tracker.next_paint(),
            Some(PendingPaint::new(a, PaintPass::Normal))
        );
        assert_eq!(
            tracker.next_paint(),
            Some(PendingPaint::new(b, PaintPass::Smooth))
        );
        assert_eq!(tracker.next_paint(), None);
    }
}

#[test]
fn test_within_pass_top_to_bottom_then_left_to_right() {
    let mut tracker = PaintTracker::new();
    tracker.request_repaint(Rect::new(50, 10, 5, 5), PaintPass::Normal);
    tracker.request_repaint(Rect::new(0, 10, 5, 5), PaintPass::Normal);
    tracker.request_repaint(Rect::new(90, 0, 5, 5), PaintPass::Normal);
    let order: Vec<(i32, i32)> = tracker.iter().map(|p| (p.rect.x, p.rect.y)).collect();
    assert_eq!(order, vec![(90, 0), (0, 10), (50, 10)]);
}

#[test]
fn test_partial_overlap_queues_only_new_area() {
    let mut tracker = PaintTracker::new();
    tracker.request_repaint(Rect::new(0, 0, 100, 50), PaintPass::Normal);
    tracker.request_repaint(Rect::new(0, 0, 100, 80), PaintPass::Normal);
    let paints: Vec<Rect> = tracker.iter().map(|p| p.rect).collect();
    assert_eq!(paints, vec![Rect::new(0, 0, 100, 50), Rect::new(0, 50, 100, 30)]);
}

#[test]
fn test_smooth_requests_dropped_while_suspended() {
    let mut tracker = PaintTracker::new();
    tracker.set_smoothing_suspended(true);
    assert!(!tracker.request_repaint(Rect::new(0, 0, 10, 10), PaintPass::Smooth));
    assert!(tracker.request_repaint(Rect::new(0, 0, 10, 10), PaintPass::Normal));
    tracker.set_smoothing_suspended(false);
    assert!(tracker.request_repaint(Rect::new(0, 0, 10, 10), PaintPass::Smooth));
}

#[test]
fn test_same_position_larger_rect_replaces_smaller() {
    let mut tracker = PaintTracker::new();
    assert!(tracker.enqueue(Rect::new(0, 0, 10, 10), PaintPass::Normal));
    assert!(tracker.enqueue(Rect::new(0, 0, 20, 20), PaintPass::Normal));
    assert!(!tracker.enqueue(Rect::new(0, 0, 5, 5), PaintPass::Normal));
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.peek().map(|p| p.rect), Some(Rect::new(0, 0, 20, 20)));
}

#[test]
fn test_cancel_all_clears_queue_and_regions() {
    let mut tracker = PaintTracker::new();
    tracker.request_repaint(Rect::new(0, 0, 10, 10), PaintPass::Normal);
    tracker.request_repaint(Rect::new(0, 0, 10, 10), PaintPass::Smooth);
    tracker.cancel_all();
    assert!(tracker.is_empty());
    assert!(tracker.pending_region(PaintPass::Normal).is_empty());
    assert!(tracker.pending_region(PaintPass::Smooth).is_empty());
    // the same area can be requested again
    assert!(tracker.request_repaint(Rect::new(0, 0, 10, 10), PaintPass::Normal));
}

#[test]
fn test_mark_painted_releases_area() {
    let mut tracker = PaintTracker::new();
    let rect = Rect::new(0, 0, 10, 10);
    tracker.request_repaint(rect, PaintPass::Normal);
    let paint = tracker.next_paint().unwrap();
    tracker.mark_painted(&paint);
    assert!(tracker.request_repaint(rect, PaintPass::Normal));
}
