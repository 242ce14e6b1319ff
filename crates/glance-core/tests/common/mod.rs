use std::io::Cursor;
use std::sync::{mpsc, Arc, Mutex};

use glance_core::busy::{BusyLevel, BusyLevelManager, BusyLevelService, ConsumerId};
use glance_core::config::{AutoZoomMode, ViewConfig};
use glance_core::geom::Size;
use glance_core::raster::Raster;
use glance_core::surface::FrameSurface;
use glance_core::view::ImageView;

/// Opaque raster filled with one colour.
pub fn solid_raster(width: usize, height: usize, rgba: [u8; 4]) -> Raster {
    let mut raster = Raster::blank(width, height, rgba[3] != 255);
    for (c, v) in rgba.into_iter().enumerate() {
        raster.data.slice_mut(ndarray::s![.., .., c]).fill(v);
    }
    raster
}

/// Opaque raster whose red channel encodes x and green channel encodes y.
pub fn gradient_raster(width: usize, height: usize) -> Raster {
    let mut raster = Raster::blank(width, height, false);
    for y in 0..height {
        for x in 0..width {
            raster.data[[y, x, 0]] = (x % 256) as u8;
            raster.data[[y, x, 1]] = (y % 256) as u8;
            raster.data[[y, x, 2]] = 50;
        }
    }
    raster
}

/// Encode a raster as PNG bytes.
pub fn png_bytes(raster: &Raster) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    raster
        .to_rgba_image()
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Config with manual zoom, so tests control the zoom explicitly.
pub fn manual_config() -> ViewConfig {
    ViewConfig {
        zoom_mode: AutoZoomMode::None,
        ..ViewConfig::default()
    }
}

/// A view of `width x height` pixels over an in-memory surface.
pub fn new_view(width: i32, height: i32, config: ViewConfig) -> ImageView<FrameSurface> {
    let surface = FrameSurface::new(width as u32, height as u32);
    let mut view = ImageView::new(surface, config, BusyLevelManager::shared());
    view.resize(Size::new(width, height));
    view
}

/// Publish `raster` as a fully decoded document, the way an incremental
/// producer would.
pub fn show_raster(view: &mut ImageView<FrameSurface>, raster: Raster) {
    let bounds = raster.bounds();
    let doc = view.document_mut();
    doc.set_image(raster);
    doc.update_rect(bounds);
    doc.finish_loading();
    view.poll_document();
}

/// Play the host loop until the view is idle. Returns the number of ticks.
pub fn pump(view: &mut ImageView<FrameSurface>) -> usize {
    let mut ticks = 0;
    for _ in 0..100_000 {
        view.poll();
        let requests = view.surface_mut().take_repaint_requests();
        for rect in &requests {
            view.paint_event(*rect);
        }
        if view.wants_tick() {
            view.tick();
            ticks += 1;
        } else if view.document().is_loading() {
            std::thread::sleep(std::time::Duration::from_millis(1));
        } else if requests.is_empty() {
            break;
        }
    }
    ticks
}

pub fn frame_pixel(view: &ImageView<FrameSurface>, x: u32, y: u32) -> [u8; 4] {
    view.surface().frame().get_pixel(x, y).0
}

/// Busy service reporting a fixed global level, recording every report.
pub struct FixedBusyService {
    pub level: Mutex<BusyLevel>,
    pub reports: Mutex<Vec<(ConsumerId, BusyLevel)>>,
}

impl FixedBusyService {
    pub fn new(level: BusyLevel) -> Arc<Self> {
        Arc::new(Self {
            level: Mutex::new(level),
            reports: Mutex::new(Vec::new()),
        })
    }

    pub fn set(&self, level: BusyLevel) {
        *self.level.lock().unwrap() = level;
    }

    pub fn last_report(&self) -> Option<BusyLevel> {
        self.reports.lock().unwrap().last().map(|(_, level)| *level)
    }
}

impl BusyLevelService for FixedBusyService {
    fn set_busy_level(&self, consumer: ConsumerId, level: BusyLevel) {
        self.reports.lock().unwrap().push((consumer, level));
    }

    fn busy_level(&self) -> BusyLevel {
        *self.level.lock().unwrap()
    }

    fn subscribe(&self) -> mpsc::Receiver<BusyLevel> {
        let (_tx, rx) = mpsc::channel();
        rx
    }
}
