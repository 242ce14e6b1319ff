use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_MAX_REPAINT_SIZE, DEFAULT_SCROLLBAR_THICKNESS, LIMIT_MAX_REPAINT_SIZE};
use crate::error::Result;
use crate::scale::SmoothAlgorithm;

/// Remembered auto-zoom policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoZoomMode {
    #[default]
    None,
    Fit,
    Width,
    Height,
}

impl std::fmt::Display for AutoZoomMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "Manual"),
            Self::Fit => write!(f, "Fit"),
            Self::Width => write!(f, "Fit Width"),
            Self::Height => write!(f, "Fit Height"),
        }
    }
}

/// Learned repaint-size caps, shared between every view of the application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaintSizeConfig {
    pub plain: u64,
    pub scaled: u64,
    pub smoothed: u64,
}

impl Default for RepaintSizeConfig {
    fn default() -> Self {
        Self {
            plain: DEFAULT_MAX_REPAINT_SIZE,
            scaled: DEFAULT_MAX_REPAINT_SIZE,
            smoothed: DEFAULT_MAX_REPAINT_SIZE,
        }
    }
}

impl RepaintSizeConfig {
    pub fn clamped(&self) -> Self {
        let clamp = |v: u64| v.clamp(DEFAULT_MAX_REPAINT_SIZE, LIMIT_MAX_REPAINT_SIZE);
        Self {
            plain: clamp(self.plain),
            scaled: clamp(self.scaled),
            smoothed: clamp(self.smoothed),
        }
    }
}

/// Settings read by the image view. The view never writes them itself; the
/// host decides when to persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Paint unsmoothed first and follow up with a smoothing pass.
    pub delayed_smoothing: bool,
    pub smooth_algorithm: SmoothAlgorithm,
    /// Let fit-to-window zoom above 1:1.
    pub enlarge_small_images: bool,
    pub show_scrollbars: bool,
    pub scrollbar_thickness: i32,
    /// Mouse wheel scrolls the image; otherwise it browses to the next/previous image.
    pub mouse_wheel_scroll: bool,
    /// RGB background behind and around the image.
    pub background_color: [u8; 3],
    pub zoom_mode: AutoZoomMode,
    pub lock_zoom: bool,
    pub repaint_size: RepaintSizeConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            delayed_smoothing: false,
            smooth_algorithm: SmoothAlgorithm::default(),
            enlarge_small_images: false,
            show_scrollbars: true,
            mouse_wheel_scroll: true,
            scrollbar_thickness: DEFAULT_SCROLLBAR_THICKNESS,
            background_color: [0x40, 0x40, 0x40],
            zoom_mode: AutoZoomMode::Fit,
            lock_zoom: false,
            repaint_size: RepaintSizeConfig::default(),
        }
    }
}

impl ViewConfig {
    /// True when paints at zoom != 1 get a deferred smoothing pass.
    pub fn does_delayed_smoothing(&self) -> bool {
        self.delayed_smoothing && self.smooth_algorithm != SmoothAlgorithm::None
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: ViewConfig = toml::from_str(text)?;
        config.repaint_size = config.repaint_size.clamped();
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "view config loaded");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        debug!(path = %path.display(), "view config saved");
        Ok(())
    }
}
