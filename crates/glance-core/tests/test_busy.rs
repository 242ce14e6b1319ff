use glance_core::busy::{
    should_resume, view_busy_level, BusyLevel, BusyLevelManager, BusyLevelService, ConsumerId,
};
use glance_core::paint_queue::PaintPass;

#[test]
fn test_level_is_max_over_consumers() {
    let manager = BusyLevelManager::new();
    let (a, b) = (ConsumerId::next(), ConsumerId::next());
    assert_eq!(manager.busy_level(), BusyLevel::None);
    manager.set_busy_level(a, BusyLevel::Smoothing);
    manager.set_busy_level(b, BusyLevel::Painting);
    assert_eq!(manager.busy_level(), BusyLevel::Painting);
    manager.set_busy_level(b, BusyLevel::None);
    assert_eq!(manager.busy_level(), BusyLevel::Smoothing);
    manager.set_busy_level(a, BusyLevel::None);
    assert_eq!(manager.busy_level(), BusyLevel::None);
}

#[test]
fn test_subscribers_see_each_change_once() {
    let manager = BusyLevelManager::new();
    let rx = manager.subscribe();
    let a = ConsumerId::next();
    manager.set_busy_level(a, BusyLevel::Painting);
    manager.set_busy_level(a, BusyLevel::Painting);
    manager.set_busy_level(a, BusyLevel::Smoothing);
    manager.set_busy_level(a, BusyLevel::None);
    let seen: Vec<BusyLevel> = rx.try_iter().collect();
    assert_eq!(
        seen,
        vec![BusyLevel::Painting, BusyLevel::Smoothing, BusyLevel::None]
    );
}

#[test]
fn test_dropped_subscriber_is_forgotten() {
    let manager = BusyLevelManager::new();
    drop(manager.subscribe());
    manager.set_busy_level(ConsumerId::next(), BusyLevel::Painting);
    assert_eq!(manager.busy_level(), BusyLevel::Painting);
}

#[test]
fn test_levels_are_ordered() {
    assert!(BusyLevel::None < BusyLevel::Smoothing);
    assert!(BusyLevel::Smoothing < BusyLevel::Painting);
}

#[test]
fn test_view_level_follows_queue_front() {
    assert_eq!(view_busy_level(false, Some(PaintPass::Normal), true), BusyLevel::None);
    assert_eq!(view_busy_level(true, Some(PaintPass::Normal), true), BusyLevel::Painting);
    assert_eq!(view_busy_level(true, Some(PaintPass::Smooth), false), BusyLevel::Smoothing);
    assert_eq!(view_busy_level(true, None, true), BusyLevel::Smoothing);
    assert_eq!(view_busy_level(true, None, false), BusyLevel::None);
}

#[test]
fn test_normal_painting_always_resumes() {
    for level in [BusyLevel::None, BusyLevel::Smoothing, BusyLevel::Painting] {
        assert!(should_resume(level, Some(PaintPass::Normal), false));
    }
}

#[test]
fn test_smoothing_waits_for_painting_elsewhere() {
    assert!(!should_resume(BusyLevel::Painting, Some(PaintPass::Smooth), false));
    assert!(!should_resume(BusyLevel::Painting, None, true));
    assert!(should_resume(BusyLevel::Smoothing, Some(PaintPass::Smooth), false));
    assert!(should_resume(BusyLevel::None, None, true));
    assert!(!should_resume(BusyLevel::None, None, false));
}
