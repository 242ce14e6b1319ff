//! The interactive image view.
//!
//! [`ImageView`] ties the components together: it owns the [`Document`],
//! the zoom state, the pending-paint tracker and the repaint governor, and
//! draws through a host-provided [`Surface`]. All of it runs on the host's
//! control thread. The host drives it with three calls:
//!
//! - `poll` each frame, to pick up decode results and busy-level changes;
//! - `paint_event` for every repaint the surface asked for;
//! - `tick` while `wants_tick` is true, one size-capped paint per call.
//!
//! Coordinates: "content" coordinates are the scrollable widget space the
//! transform maps images into; the surface sees viewport-local coordinates,
//! i.e. content coordinates minus the scroll position.

mod input;
mod scheduler;
mod types;

pub use types::{ScrollKey, ViewEvent};

use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc;

use tracing::{debug, info};

use crate::adjust::ImageAdjustments;
use crate::busy::{BusyLevel, ConsumerId, SharedBusyService};
use crate::config::{AutoZoomMode, RepaintSizeConfig, ViewConfig};
use crate::document::{Document, DocumentEvent};
use crate::geom::{Point, Rect, Size};
use crate::governor::{PaintKind, RepaintGovernor};
use crate::paint_queue::{PaintPass, PaintTracker, PendingPaint};
use crate::region::Region;
use crate::surface::Surface;
use crate::tool::Tool;
use crate::transform::ViewTransform;
use crate::zoom::{content_size, image_offset, ScrollBarMode, ZoomController, ZoomGeometry};

pub struct ImageView<S: Surface> {
    surface: S,
    document: Document,
    config: ViewConfig,
    zoom: ZoomController,
    tool: Tool,
    tracker: PaintTracker,
    governor: RepaintGovernor,
    adjustments: ImageAdjustments,
    /// Image-space pixels known to be decoded.
    valid_area: Region,
    /// Full widget size, scrollbars included.
    size: Size,
    content: Size,
    scroll: Point,
    timer_active: bool,
    smooth_pass_scheduled: bool,
    updates_enabled: bool,
    repaint_deferred: bool,
    busy: SharedBusyService,
    busy_id: ConsumerId,
    busy_rx: mpsc::Receiver<BusyLevel>,
    left_down: bool,
    right_down: bool,
    /// Suppresses the context menu after a left+right "previous" gesture.
    opera_like_previous: bool,
    events: VecDeque<ViewEvent>,
    ticks: u64,
}

impl<S: Surface> ImageView<S> {
    pub fn new(surface: S, config: ViewConfig, busy: SharedBusyService) -> Self {
        let caps = config.repaint_size.clamped();
        let mut zoom = ZoomController::new(config.zoom_mode, config.lock_zoom);
        zoom.set_enlarge_small_images(config.enlarge_small_images);
        zoom.set_show_scrollbars(config.show_scrollbars);
        let busy_rx = busy.subscribe();
        Self {
            surface,
            document: Document::new(Some(busy.clone())),
            config,
            zoom,
            tool: Tool::default(),
            tracker: PaintTracker::new(),
            governor: RepaintGovernor::with_caps(caps.plain, caps.scaled, caps.smoothed),
            adjustments: ImageAdjustments::default(),
            valid_area: Region::new(),
            size: Size::default(),
            content: Size::default(),
            scroll: Point::default(),
            timer_active: false,
            smooth_pass_scheduled: false,
            updates_enabled: true,
            repaint_deferred: false,
            busy,
            busy_id: ConsumerId::next(),
            busy_rx,
            left_down: false,
            right_down: false,
            opera_like_previous: false,
            events: VecDeque::new(),
            ticks: 0,
        }
    }

    // ----- accessors -----

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// For producers that publish pixels incrementally. Call
    /// [`ImageView::poll_document`] afterwards.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn zoom(&self) -> f64 {
        self.zoom.zoom()
    }

    pub fn zoom_controller(&self) -> &ZoomController {
        &self.zoom
    }

    /// Centering offset of the image in content coordinates.
    pub fn offset(&self) -> Point {
        self.zoom.offset()
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.zoom.zoom(), self.zoom.offset())
    }

    pub fn scroll_position(&self) -> Point {
        self.scroll
    }

    pub fn content_size(&self) -> Size {
        self.content
    }

    pub fn adjustments(&self) -> &ImageAdjustments {
        &self.adjustments
    }

    pub fn governor(&self) -> &RepaintGovernor {
        &self.governor
    }

    pub fn valid_area(&self) -> &Region {
        &self.valid_area
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Queued paints in processing order (content coordinates).
    pub fn pending_paints(&self) -> Vec<PendingPaint> {
        self.tracker.iter().collect()
    }

    pub fn smooth_pass_scheduled(&self) -> bool {
        self.smooth_pass_scheduled
    }

    /// Scheduling steps executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn updates_enabled(&self) -> bool {
        self.updates_enabled
    }

    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain(..).collect()
    }

    // ----- geometry -----

    fn image_size(&self) -> Option<Size> {
        self.document.image().map(|img| img.size())
    }

    fn geometry(&self) -> ZoomGeometry {
        ZoomGeometry {
            view: self.size,
            image: self.image_size(),
            scrollbars: self.zoom.scrollbar_mode(),
            scrollbar_thickness: self.config.scrollbar_thickness,
        }
    }

    /// Visible part of the widget: its size minus any scrollbars the
    /// content needs.
    pub fn visible_size(&self) -> Size {
        let (mut w, mut h) = (self.size.width, self.size.height);
        if self.zoom.scrollbar_mode() == ScrollBarMode::Auto {
            let t = self.config.scrollbar_thickness;
            let mut horizontal = self.content.width > w;
            let vertical =
                self.content.height > h || (horizontal && self.content.height > h - t);
            if vertical {
                w -= t;
                horizontal = horizontal || self.content.width > w;
            }
            if horizontal {
                h -= t;
            }
        }
        Size::new(w.max(0), h.max(0))
    }

    /// Visible area in content coordinates.
    pub fn visible_rect(&self) -> Rect {
        let vis = self.visible_size();
        Rect::new(self.scroll.x, self.scroll.y, vis.width, vis.height)
    }

    /// Visible area in viewport coordinates.
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_size(self.visible_size())
    }

    fn to_viewport(&self, content: Rect) -> Rect {
        content.translated(-self.scroll.x, -self.scroll.y)
    }

    fn update_content_size(&mut self) {
        self.content = content_size(self.image_size(), self.zoom.zoom());
        self.surface.resize_contents(self.content);
        self.scroll = self.clamped_scroll(self.scroll);
    }

    fn update_image_offset(&mut self) {
        let offset = image_offset(&self.geometry(), self.zoom.zoom());
        self.zoom.store_offset(offset);
    }

    fn clamped_scroll(&self, pos: Point) -> Point {
        let vis = self.visible_size();
        let max_x = (self.content.width - vis.width).max(0);
        let max_y = (self.content.height - vis.height).max(0);
        Point::new(pos.x.clamp(0, max_x), pos.y.clamp(0, max_y))
    }

    fn center_on(&mut self, center: Point) {
        let vis = self.visible_size();
        self.scroll = self.clamped_scroll(Point::new(
            center.x - vis.width / 2,
            center.y - vis.height / 2,
        ));
    }

    // ----- document -----

    /// Start loading `path`; progress arrives through [`ImageView::poll`].
    pub fn open(&mut self, path: &Path) {
        self.document.open(path);
        self.poll_document();
    }

    pub fn open_bytes(&mut self, bytes: Vec<u8>) {
        self.document.open_bytes(bytes);
        self.poll_document();
    }

    /// Block until the current decode finishes and apply its events.
    pub fn wait_for_document(&mut self) {
        for event in self.document.wait() {
            self.handle_document_event(event);
        }
    }

    /// Apply document events. Returns how many were handled.
    pub fn poll_document(&mut self) -> usize {
        let events = self.document.poll();
        let count = events.len();
        for event in events {
            self.handle_document_event(event);
        }
        count
    }

    /// Per-frame housekeeping: document events and busy-level changes.
    pub fn poll(&mut self) {
        self.poll_document();
        self.sync_busy_level();
    }

    pub fn handle_document_event(&mut self, event: DocumentEvent) {
        match event {
            DocumentEvent::LoadingStarted => self.loading_started(),
            DocumentEvent::SizeKnown { width, height } => {
                debug!(width, height, "image size known");
                self.image_size_updated();
            }
            DocumentEvent::RectUpdated(rect) => self.image_rect_updated(rect),
            DocumentEvent::Loaded => self.loaded(),
            DocumentEvent::LoadFailed { .. } => self.load_failed(),
            DocumentEvent::Modified => self.modified(),
        }
    }

    fn loading_started(&mut self) {
        self.cancel_pending();
        self.tracker.set_smoothing_suspended(true);
        self.valid_area.clear();
        self.adjustments.reset();
        let viewport = Rect::from_size(self.size);
        self.surface.erase(viewport, self.config.background_color);
    }

    fn image_size_updated(&mut self) {
        self.valid_area.clear();
        if !self.zoom.is_auto(true) {
            self.scroll = Point::default();
        }
        let geometry = self.geometry();
        if let Some(zoom) = self.zoom.image_size_changed(&geometry) {
            self.set_zoom(zoom, None);
        }
        self.update_content_size();
        self.update_image_offset();
        self.full_repaint();
    }

    fn image_rect_updated(&mut self, rect: Rect) {
        let Some(bounds) = self.document.image().map(|img| img.bounds()) else {
            return;
        };
        let rect = rect.intersect(&bounds);
        if rect.is_empty() {
            return;
        }
        self.valid_area.add_rect(rect);
        let widget = self.transform().image_to_widget_rect(&rect);
        let exposed = self.to_viewport(widget).intersect(&self.viewport_rect());
        if self.updates_enabled {
            self.surface.request_repaint(exposed);
        } else {
            self.repaint_deferred = true;
        }
    }

    fn loaded(&mut self) {
        if self.document.is_null() {
            self.update_content_size();
            self.request_full_viewport();
            return;
        }
        info!(zoom = self.zoom.zoom(), "image ready");
        if self.config.does_delayed_smoothing() {
            self.schedule_smooth_pass();
        }
    }

    fn load_failed(&mut self) {
        self.cancel_pending();
        self.valid_area.clear();
        self.scroll = Point::default();
        self.update_content_size();
        self.zoom.store_offset(Point::default());
        self.surface
            .erase(Rect::from_size(self.size), self.config.background_color);
        self.request_full_viewport();
    }

    fn modified(&mut self) {
        if let Some(bounds) = self.document.image().map(|img| img.bounds()) {
            self.valid_area = Region::from_rect(bounds);
        }
        if self.zoom.is_auto(false) {
            let zoom = self.zoom.compute_auto_zoom(&self.geometry());
            self.set_zoom(zoom, None);
        } else {
            self.update_content_size();
            self.update_image_offset();
            self.full_repaint();
        }
    }

    // ----- viewport -----

    /// The widget was resized to `size` (scrollbars included).
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        if self.zoom.is_auto(false) {
            let zoom = self.zoom.compute_auto_zoom(&self.geometry());
            self.set_zoom(zoom, None);
        } else {
            self.update_content_size();
            self.update_image_offset();
            self.full_repaint();
        }
    }

    pub fn scroll_to(&mut self, pos: Point) {
        let target = self.clamped_scroll(pos);
        let (dx, dy) = (target.x - self.scroll.x, target.y - self.scroll.y);
        if dx == 0 && dy == 0 {
            return;
        }
        self.scroll = target;
        if !self.updates_enabled {
            self.repaint_deferred = true;
            return;
        }
        let vis = self.visible_size();
        if dx.abs() >= vis.width || dy.abs() >= vis.height || !self.surface.scroll_contents(dx, dy)
        {
            self.request_full_viewport();
            return;
        }
        // strips uncovered by the shift
        if dx > 0 {
            self.surface
                .request_repaint(Rect::new(vis.width - dx, 0, dx, vis.height));
        } else if dx < 0 {
            self.surface.request_repaint(Rect::new(0, 0, -dx, vis.height));
        }
        if dy > 0 {
            self.surface
                .request_repaint(Rect::new(0, vis.height - dy, vis.width, dy));
        } else if dy < 0 {
            self.surface.request_repaint(Rect::new(0, 0, vis.width, -dy));
        }
    }

    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_to(Point::new(self.scroll.x + dx, self.scroll.y + dy));
    }

    /// Arrow keys scroll by half the widget size.
    pub fn key_scroll(&mut self, key: ScrollKey) {
        let (x, y) = key.direction();
        self.scroll_by(x * self.size.width / 2, y * self.size.height / 2);
    }

    fn request_full_viewport(&mut self) {
        let viewport = self.viewport_rect();
        self.surface.request_repaint(viewport);
    }

    /// Throw away queued paints and repaint the whole viewport once. While
    /// updates are disabled the repaint waits for them to come back on.
    pub fn full_repaint(&mut self) {
        self.cancel_pending();
        if self.updates_enabled {
            self.request_full_viewport();
        } else {
            self.repaint_deferred = true;
        }
    }

    pub fn set_updates_enabled(&mut self, enabled: bool) {
        self.updates_enabled = enabled;
        if enabled && self.repaint_deferred {
            self.repaint_deferred = false;
            self.full_repaint();
        }
    }

    /// The host asks for `rect` (viewport coordinates) to be drawn.
    pub fn paint_event(&mut self, rect: Rect) {
        if self.valid_area.is_empty() {
            self.surface.erase(rect, self.config.background_color);
            return;
        }
        let content = rect.translated(self.scroll.x, self.scroll.y);
        self.add_pending_paint(PaintPass::Normal, content);
    }

    // ----- zoom -----

    /// Apply `zoom`, keeping the view centered on `center` (content
    /// coordinates at the new zoom) or on what is currently centered.
    pub fn set_zoom(&mut self, zoom: f64, center: Option<Point>) {
        let vis = self.visible_size();
        let old_zoom = self.zoom.zoom();
        let old_offset = self.zoom.offset();
        let zoom = self.zoom.store_zoom(zoom);
        self.update_content_size();
        let center = center.unwrap_or_else(|| {
            let cx = (vis.width / 2 + self.scroll.x - old_offset.x) as f64 / old_zoom * zoom;
            let cy = (vis.height / 2 + self.scroll.y - old_offset.y) as f64 / old_zoom * zoom;
            Point::new(cx as i32, cy as i32)
        });
        self.center_on(center);
        self.update_image_offset();
        debug!(zoom, old = old_zoom, "zoom changed");
        self.full_repaint();
        self.events.push_back(ViewEvent::ZoomChanged(zoom));
    }

    pub fn zoom_in(&mut self) {
        self.zoom.note_manual_zoom();
        let zoom = self.zoom.compute_zoom(true, &self.geometry());
        self.set_zoom(zoom, None);
    }

    pub fn zoom_out(&mut self) {
        self.zoom.note_manual_zoom();
        let zoom = self.zoom.compute_zoom(false, &self.geometry());
        self.set_zoom(zoom, None);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom.note_manual_zoom();
        self.set_zoom(1.0, None);
    }

    fn set_auto_zoom(&mut self, mode: AutoZoomMode, enabled: bool) {
        let offset = self.zoom.offset();
        let center = Point::new(
            self.size.width / 2 + self.scroll.x + offset.x,
            self.size.height / 2 + self.scroll.y + offset.y,
        );
        let geometry = self.geometry();
        let (zoom, center) = self.zoom.set_auto_mode(mode, enabled, center, &geometry);
        self.set_zoom(zoom, center);
    }

    pub fn set_zoom_to_fit(&mut self, enabled: bool) {
        self.set_auto_zoom(AutoZoomMode::Fit, enabled);
    }

    pub fn set_zoom_to_width(&mut self, enabled: bool) {
        self.set_auto_zoom(AutoZoomMode::Width, enabled);
    }

    pub fn set_zoom_to_height(&mut self, enabled: bool) {
        self.set_auto_zoom(AutoZoomMode::Height, enabled);
    }

    /// Freeze the current zoom across image changes. Turns auto modes off
    /// without changing the zoom they produced.
    pub fn set_lock_zoom(&mut self, lock: bool) {
        self.zoom.set_lock_zoom(lock);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom.can_zoom_in()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom.can_zoom_out()
    }

    // ----- adjustments -----

    fn adjust(&mut self, change: impl FnOnce(&mut ImageAdjustments)) {
        change(&mut self.adjustments);
        self.full_repaint();
    }

    pub fn increase_gamma(&mut self) {
        self.adjust(ImageAdjustments::increase_gamma);
    }

    pub fn decrease_gamma(&mut self) {
        self.adjust(ImageAdjustments::decrease_gamma);
    }

    pub fn increase_brightness(&mut self) {
        self.adjust(ImageAdjustments::increase_brightness);
    }

    pub fn decrease_brightness(&mut self) {
        self.adjust(ImageAdjustments::decrease_brightness);
    }

    pub fn increase_contrast(&mut self) {
        self.adjust(ImageAdjustments::increase_contrast);
    }

    pub fn decrease_contrast(&mut self) {
        self.adjust(ImageAdjustments::decrease_contrast);
    }

    /// Replace all three adjustments at once (values are clamped).
    pub fn set_adjustments(&mut self, adjustments: ImageAdjustments) {
        self.adjust(|a| *a = adjustments);
    }

    // ----- settings -----

    /// Pick up a changed configuration. Learned repaint caps start over.
    pub fn update_from_settings(&mut self, config: ViewConfig) {
        self.config = config;
        self.zoom
            .set_enlarge_small_images(self.config.enlarge_small_images);
        self.zoom.set_show_scrollbars(self.config.show_scrollbars);
        self.governor.reset();
        if self.config.does_delayed_smoothing() {
            self.schedule_smooth_pass();
        } else {
            self.full_repaint();
        }
        if self.zoom.is_auto(false) {
            let zoom = self.zoom.compute_auto_zoom(&self.geometry());
            self.set_zoom(zoom, None);
        }
    }

    /// The current settings with the learned caps and zoom-mode flags
    /// folded in, for the host to persist.
    pub fn write_config(&self) -> ViewConfig {
        let mut config = self.config.clone();
        config.zoom_mode = self.zoom.auto_mode();
        config.lock_zoom = self.zoom.lock_zoom();
        config.repaint_size = RepaintSizeConfig {
            plain: self.governor.cap(PaintKind::Plain),
            scaled: self.governor.cap(PaintKind::Scaled),
            smoothed: self.governor.cap(PaintKind::Smoothed),
        };
        config
    }
}

impl<S: Surface> Drop for ImageView<S> {
    fn drop(&mut self) {
        self.busy.set_busy_level(self.busy_id, BusyLevel::None);
    }
}
