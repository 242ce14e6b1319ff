use glance_core::config::{AutoZoomMode, RepaintSizeConfig, ViewConfig};
use glance_core::error::GlanceError;
use glance_core::scale::SmoothAlgorithm;

#[test]
fn test_defaults() {
    let config = ViewConfig::default();
    assert_eq!(config.zoom_mode, AutoZoomMode::Fit);
    assert_eq!(config.smooth_algorithm, SmoothAlgorithm::Normal);
    assert!(!config.delayed_smoothing);
    assert!(!config.does_delayed_smoothing());
    assert_eq!(config.repaint_size, RepaintSizeConfig::default());
    assert_eq!(config.repaint_size.plain, 10_000);
}

#[test]
fn test_delayed_smoothing_needs_an_algorithm() {
    let config = ViewConfig {
        delayed_smoothing: true,
        smooth_algorithm: SmoothAlgorithm::None,
        ..ViewConfig::default()
    };
    assert!(!config.does_delayed_smoothing());
}

#[test]
fn test_partial_file_fills_defaults() {
    let config = ViewConfig::from_toml_str("delayed_smoothing = true\nzoom_mode = \"Width\"\n").unwrap();
    assert!(config.delayed_smoothing);
    assert_eq!(config.zoom_mode, AutoZoomMode::Width);
    assert_eq!(config.background_color, ViewConfig::default().background_color);
}

#[test]
fn test_repaint_caps_are_clamped_on_load() {
    let text = "[repaint_size]\nplain = 5\nscaled = 20000\nsmoothed = 999999999\n";
    let config = ViewConfig::from_toml_str(text).unwrap();
    assert_eq!(
        config.repaint_size,
        RepaintSizeConfig {
            plain: 10_000,
            scaled: 20_000,
            smoothed: 10_000_000,
        }
    );
}

#[test]
fn test_invalid_toml_is_an_error() {
    let err = ViewConfig::from_toml_str("zoom_mode = 3").unwrap_err();
    assert!(matches!(err, GlanceError::ConfigParse(_)));
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.toml");
    let config = ViewConfig {
        smooth_algorithm: SmoothAlgorithm::Best,
        lock_zoom: true,
        zoom_mode: AutoZoomMode::None,
        background_color: [1, 2, 3],
        ..ViewConfig::default()
    };
    config.save(&path).unwrap();
    assert_eq!(ViewConfig::load(&path).unwrap(), config);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ViewConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, GlanceError::Io(_)));
}
