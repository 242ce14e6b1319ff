use std::time::Duration;

use glance_core::consts::{DEFAULT_MAX_REPAINT_SIZE, LIMIT_MAX_REPAINT_SIZE};
use glance_core::geom::Rect;
use glance_core::governor::{split_rows, PaintKind, RepaintGovernor};
use glance_core::paint_queue::PaintPass;

#[test]
fn test_caps_start_at_default() {
    let g = RepaintGovernor::new();
    for kind in [PaintKind::Plain, PaintKind::Scaled, PaintKind::Smoothed] {
        assert_eq!(g.cap(kind), DEFAULT_MAX_REPAINT_SIZE);
    }
}

#[test]
fn test_converges_toward_measured_throughput() {
    let mut g = RepaintGovernor::new();
    // 50_000 px in 10 ms -> 500_000 px per tenth of a second
    let target = 500_000u64;
    for _ in 0..20 {
        g.record(PaintKind::Scaled, 50_000, Duration::from_millis(10));
    }
    let cap = g.cap(PaintKind::Scaled);
    assert!(cap.abs_diff(target) < target / 100, "cap={cap}");
    // other caps untouched
    assert_eq!(g.cap(PaintKind::Plain), DEFAULT_MAX_REPAINT_SIZE);
}

#[test]
fn test_single_update_is_halfway() {
    let mut g = RepaintGovernor::new();
    g.record(PaintKind::Plain, 20_000, Duration::from_millis(100));
    // 20_000 * 100 / 100 = 20_000 -> (20_000 + 10_000) / 2
    assert_eq!(g.cap(PaintKind::Plain), 15_000);
}

#[test]
fn test_small_paints_are_not_measured() {
    let mut g = RepaintGovernor::new();
    g.record(PaintKind::Plain, 9_999, Duration::from_millis(1));
    assert_eq!(g.cap(PaintKind::Plain), DEFAULT_MAX_REPAINT_SIZE);
}

#[test]
fn test_cap_stays_within_bounds() {
    let mut g = RepaintGovernor::new();
    for _ in 0..50 {
        g.record(PaintKind::Smoothed, 10_000, Duration::from_secs(100));
        assert!(g.cap(PaintKind::Smoothed) >= DEFAULT_MAX_REPAINT_SIZE);
    }
    for _ in 0..50 {
        g.record(PaintKind::Smoothed, 5_000_000, Duration::ZERO);
        assert!(g.cap(PaintKind::Smoothed) <= LIMIT_MAX_REPAINT_SIZE);
    }
    assert_eq!(g.cap(PaintKind::Smoothed), LIMIT_MAX_REPAINT_SIZE);
}

#[test]
fn test_persisted_caps_are_clamped() {
    let g = RepaintGovernor::with_caps(5, 50_000, u64::MAX);
    assert_eq!(g.cap(PaintKind::Plain), DEFAULT_MAX_REPAINT_SIZE);
    assert_eq!(g.cap(PaintKind::Scaled), 50_000);
    assert_eq!(g.cap(PaintKind::Smoothed), LIMIT_MAX_REPAINT_SIZE);
}

#[test]
fn test_max_rows_rounds_up_with_floor_of_five() {
    assert_eq!(RepaintGovernor::max_rows(2_000, 100), 20);
    assert_eq!(RepaintGovernor::max_rows(2_001, 100), 21);
    assert_eq!(RepaintGovernor::max_rows(10_000, 5_000), 5);
}

#[test]
fn test_split_keeps_first_rows() {
    let (head, tail) = split_rows(Rect::new(0, 0, 100, 2000), 20);
    assert_eq!(head, Rect::new(0, 0, 100, 20));
    assert_eq!(tail, Some(Rect::new(0, 20, 100, 1980)));
    let (whole, none) = split_rows(Rect::new(0, 0, 100, 10), 20);
    assert_eq!(whole, Rect::new(0, 0, 100, 10));
    assert_eq!(none, None);
}

#[test]
fn test_limit_uses_cap_of_kind() {
    let g = RepaintGovernor::with_caps(10_000, 20_000, 40_000);
    let rect = Rect::new(0, 0, 1_000, 1_000);
    assert_eq!(g.limit(PaintKind::Plain, rect).0.height, 10);
    assert_eq!(g.limit(PaintKind::Scaled, rect).0.height, 20);
    assert_eq!(g.limit(PaintKind::Smoothed, rect).0.height, 40);
}

#[test]
fn test_classify_matches_render_path() {
    assert_eq!(PaintKind::classify(1.0, PaintPass::Smooth, true), PaintKind::Plain);
    assert_eq!(PaintKind::classify(2.0, PaintPass::Normal, true), PaintKind::Scaled);
    assert_eq!(PaintKind::classify(2.0, PaintPass::Smooth, true), PaintKind::Smoothed);
    assert_eq!(PaintKind::classify(0.5, PaintPass::Normal, false), PaintKind::Smoothed);
}
