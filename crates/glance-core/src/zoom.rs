//! Zoom factor and auto-zoom policy.
//!
//! Auto modes recompute the zoom from the viewport whenever the viewport or
//! image size changes. Enabling one snapshots the manual zoom and the view
//! center so that disabling it can restore them. Lock zoom freezes the
//! numeric zoom across image changes without touching the remembered mode.

use tracing::debug;

use crate::config::AutoZoomMode;
use crate::consts::{MAX_ZOOM, ZOOM_STEP};
use crate::geom::{Point, Size};
use crate::tool::ToolMode;

/// Scrollbar visibility policy of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollBarMode {
    /// Shown only when content overflows.
    #[default]
    Auto,
    AlwaysOff,
}

/// Everything the auto-zoom formulas need to know about the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomGeometry {
    /// Full widget size, scrollbars included.
    pub view: Size,
    /// `None` while no image is loaded.
    pub image: Option<Size>,
    pub scrollbars: ScrollBarMode,
    pub scrollbar_thickness: i32,
}

/// View-mode state read by the transformer and paint executor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub offset: Point,
    pub tool: ToolMode,
    pub auto_zoom: AutoZoomMode,
    /// Set when the user zooms manually while an auto mode is selected.
    pub manual_override: bool,
    pub lock_zoom: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Point::default(),
            tool: ToolMode::Scroll,
            auto_zoom: AutoZoomMode::None,
            manual_override: false,
            lock_zoom: false,
        }
    }
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() || zoom <= 0.0 {
        return 1.0;
    }
    zoom.clamp(1.0 / MAX_ZOOM, MAX_ZOOM)
}

/// Largest zoom showing the whole image, capped at 1:1 unless `enlarge`.
pub fn zoom_to_fit(geometry: &ZoomGeometry, enlarge: bool) -> f64 {
    let Some(image) = geometry.image.filter(|s| !s.is_empty()) else {
        return 1.0;
    };
    let view = geometry.view;
    // aspect-preserving integer scale of the image into the view
    let by_height = view.height as i64 * image.width as i64 / image.height as i64;
    let scaled_width = if by_height <= view.width as i64 {
        by_height
    } else {
        view.width as i64
    };
    let zoom = scaled_width as f64 / image.width as f64;
    if zoom > 1.0 && !enlarge {
        return 1.0;
    }
    zoom
}

/// Zoom making the image as wide as the view, minus the vertical scrollbar
/// when the image will be taller than the view at that zoom.
pub fn zoom_to_width(geometry: &ZoomGeometry) -> f64 {
    let Some(image) = geometry.image.filter(|s| !s.is_empty()) else {
        return 1.0;
    };
    let w = geometry.view.width as f64;
    let dw = image.width as f64;
    match geometry.scrollbars {
        ScrollBarMode::AlwaysOff => w / dw,
        ScrollBarMode::Auto => {
            if image.height as f64 * (w / dw) > geometry.view.height as f64 {
                (w - geometry.scrollbar_thickness as f64) / dw
            } else {
                w / dw
            }
        }
    }
}

/// Zoom making the image as tall as the view, minus the horizontal scrollbar
/// when the image will be wider than the view at that zoom.
pub fn zoom_to_height(geometry: &ZoomGeometry) -> f64 {
    let Some(image) = geometry.image.filter(|s| !s.is_empty()) else {
        return 1.0;
    };
    let h = geometry.view.height as f64;
    let dh = image.height as f64;
    match geometry.scrollbars {
        ScrollBarMode::AlwaysOff => h / dh,
        ScrollBarMode::Auto => {
            if image.width as f64 * (h / dh) > geometry.view.width as f64 {
                (h - geometry.scrollbar_thickness as f64) / dh
            } else {
                h / dh
            }
        }
    }
}

/// Next zoom step from `zoom`, stopping at any of `targets` on the way.
///
/// Above 1:1 steps are multiples of `ZOOM_STEP`; below it they are
/// reciprocals of multiples of `ZOOM_STEP`, so both sides look symmetric.
pub fn step_zoom(zoom: f64, zoom_in: bool, targets: &[f64]) -> f64 {
    let f = ZOOM_STEP;
    if zoom_in {
        let mut next = if zoom >= 1.0 {
            ((zoom / f).floor() + 1.0) * f
        } else {
            1.0 / (((1.0 / zoom / f).ceil() - 1.0) * f)
        };
        for &t in targets {
            if zoom < t && t < next {
                next = t;
            }
        }
        next
    } else {
        let mut next = if zoom > 1.0 {
            ((zoom / f).ceil() - 1.0) * f
        } else {
            1.0 / (((1.0 / zoom / f).floor() + 1.0) * f)
        };
        for &t in targets {
            if zoom > t && t > next {
                next = t;
            }
        }
        next
    }
}

/// Centering offset of the zoomed image inside the view. Each axis is
/// centered only when the image is smaller than the view on that axis, after
/// accounting for the scrollbar the other axis will need.
pub fn image_offset(geometry: &ZoomGeometry, zoom: f64) -> Point {
    let Some(image) = geometry.image else {
        return Point::default();
    };
    let mut view_w = geometry.view.width;
    let mut view_h = geometry.view.height;
    let zoomed_w = (image.width as f64 * zoom) as i32;
    let zoomed_h = (image.height as f64 * zoom) as i32;
    let bars = geometry.scrollbars != ScrollBarMode::AlwaysOff;
    if zoomed_w > view_w && bars {
        view_h -= geometry.scrollbar_thickness;
    }
    if zoomed_h > view_h && bars {
        view_w -= geometry.scrollbar_thickness;
    }
    Point::new(
        ((view_w - zoomed_w) / 2).max(0),
        ((view_h - zoomed_h) / 2).max(0),
    )
}

/// Size of the scrollable content at `zoom`.
pub fn content_size(image: Option<Size>, zoom: f64) -> Size {
    match image {
        Some(s) => Size::new(
            (s.width as f64 * zoom) as i32,
            (s.height as f64 * zoom) as i32,
        ),
        None => Size::default(),
    }
}

/// Owner of [`ViewState`]'s zoom fields and the before-auto snapshot.
#[derive(Clone, Debug)]
pub struct ZoomController {
    state: ViewState,
    enlarge_small_images: bool,
    show_scrollbars: bool,
    zoom_before_auto: f64,
    center_before_auto: Point,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            state: ViewState::default(),
            enlarge_small_images: false,
            show_scrollbars: true,
            zoom_before_auto: 1.0,
            center_before_auto: Point::default(),
        }
    }
}

impl ZoomController {
    pub fn new(auto_zoom: AutoZoomMode, lock_zoom: bool) -> Self {
        let mut ctl = Self::default();
        ctl.state.auto_zoom = auto_zoom;
        ctl.state.lock_zoom = lock_zoom && auto_zoom == AutoZoomMode::None;
        ctl
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn offset(&self) -> Point {
        self.state.offset
    }

    pub fn auto_mode(&self) -> AutoZoomMode {
        self.state.auto_zoom
    }

    pub fn lock_zoom(&self) -> bool {
        self.state.lock_zoom
    }

    pub fn manual_override(&self) -> bool {
        self.state.manual_override
    }

    pub fn set_tool(&mut self, tool: ToolMode) {
        self.state.tool = tool;
    }

    pub fn set_enlarge_small_images(&mut self, enlarge: bool) {
        self.enlarge_small_images = enlarge;
    }

    pub fn set_show_scrollbars(&mut self, show: bool) {
        self.show_scrollbars = show;
    }

    /// Store a new zoom, clamped to the valid range. Returns the stored value.
    pub fn store_zoom(&mut self, zoom: f64) -> f64 {
        self.state.zoom = clamp_zoom(zoom);
        self.state.zoom
    }

    pub fn store_offset(&mut self, offset: Point) {
        self.state.offset = offset;
    }

    /// True when an auto mode drives the zoom. With `ignore_manual` a manual
    /// override does not count.
    pub fn is_auto(&self, ignore_manual: bool) -> bool {
        self.state.auto_zoom != AutoZoomMode::None && (ignore_manual || !self.state.manual_override)
    }

    /// Scrollbars are hidden in fit mode (unless overridden manually) or
    /// when disabled in the config.
    pub fn scrollbar_mode(&self) -> ScrollBarMode {
        let fit = self.state.auto_zoom == AutoZoomMode::Fit && !self.state.manual_override;
        if fit || !self.show_scrollbars {
            ScrollBarMode::AlwaysOff
        } else {
            ScrollBarMode::Auto
        }
    }

    /// Zoom the active auto mode asks for; 1.0 without an image or mode.
    pub fn compute_auto_zoom(&self, geometry: &ZoomGeometry) -> f64 {
        let geometry = self.with_own_scrollbars(geometry);
        match self.state.auto_zoom {
            AutoZoomMode::Fit => zoom_to_fit(&geometry, self.enlarge_small_images),
            AutoZoomMode::Width => zoom_to_width(&geometry),
            AutoZoomMode::Height => zoom_to_height(&geometry),
            AutoZoomMode::None => 1.0,
        }
    }

    /// `geometry` with the scrollbar policy this controller implies.
    fn with_own_scrollbars(&self, geometry: &ZoomGeometry) -> ZoomGeometry {
        ZoomGeometry {
            scrollbars: self.scrollbar_mode(),
            ..*geometry
        }
    }

    /// Next manual zoom step, stopping at fit, width and height targets.
    pub fn compute_zoom(&self, zoom_in: bool, geometry: &ZoomGeometry) -> f64 {
        let geometry = self.with_own_scrollbars(geometry);
        let targets = [
            zoom_to_fit(&geometry, self.enlarge_small_images),
            zoom_to_width(&geometry),
            zoom_to_height(&geometry),
        ];
        step_zoom(self.state.zoom, zoom_in, &targets)
    }

    /// A manual zoom action while an auto mode is selected overrides it.
    pub fn note_manual_zoom(&mut self) {
        if self.is_auto(false) {
            self.state.manual_override = true;
        }
    }

    /// Select or deselect an auto mode. Returns the zoom and optional center
    /// (content coordinates) the view should apply.
    ///
    /// `center` is the current view center, recorded when a mode is enabled
    /// from manual zoom.
    pub fn set_auto_mode(
        &mut self,
        mode: AutoZoomMode,
        enabled: bool,
        center: Point,
        geometry: &ZoomGeometry,
    ) -> (f64, Option<Point>) {
        self.state.manual_override = false;
        if enabled && mode != AutoZoomMode::None {
            if self.state.auto_zoom == AutoZoomMode::None {
                self.zoom_before_auto = self.state.zoom;
                self.center_before_auto = center;
            }
            self.state.auto_zoom = mode;
            self.state.lock_zoom = false;
            debug!(%mode, "auto zoom enabled");
            (self.compute_auto_zoom(geometry), None)
        } else if self.state.auto_zoom == mode {
            self.state.auto_zoom = AutoZoomMode::None;
            debug!(%mode, "auto zoom disabled");
            (self.zoom_before_auto, Some(self.center_before_auto))
        } else {
            (self.state.zoom, None)
        }
    }

    /// Lock zoom turns off auto modes but keeps whatever zoom they produced.
    pub fn set_lock_zoom(&mut self, lock: bool) {
        if lock {
            self.state.auto_zoom = AutoZoomMode::None;
            self.state.manual_override = false;
        }
        self.state.lock_zoom = lock;
    }

    /// A new image size is known: drop the override and the saved center.
    /// Returns the zoom to apply, or `None` when lock zoom keeps the current one.
    pub fn image_size_changed(&mut self, geometry: &ZoomGeometry) -> Option<f64> {
        self.state.manual_override = false;
        self.state.offset = Point::default();
        if self.is_auto(true) {
            self.center_before_auto = Point::default();
            Some(self.compute_auto_zoom(geometry))
        } else if self.state.lock_zoom {
            None
        } else {
            Some(1.0)
        }
    }

    /// Zoom-in is possible below the maximum, or always in auto mode.
    pub fn can_zoom_in(&self) -> bool {
        self.is_auto(false) || self.state.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.is_auto(false) || self.state.zoom > 1.0 / MAX_ZOOM
    }
}
