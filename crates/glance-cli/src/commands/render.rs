use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use glance_core::adjust::ImageAdjustments;
use glance_core::busy::BusyLevelManager;
use glance_core::config::{AutoZoomMode, ViewConfig};
use glance_core::geom::Size;
use glance_core::scale::SmoothAlgorithm;
use glance_core::surface::FrameSurface;
use glance_core::view::ImageView;
use indicatif::{ProgressBar, ProgressStyle};

use crate::summary::{print_render_summary, RenderStats};

/// Upper bound on host-loop iterations before giving up.
const MAX_FRAMES: usize = 1_000_000;

#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    /// Nearest neighbour
    None,
    /// Bilinear
    Fast,
    /// Bicubic
    Normal,
    /// Lanczos
    Best,
}

impl From<AlgorithmArg> for SmoothAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::None => SmoothAlgorithm::None,
            AlgorithmArg::Fast => SmoothAlgorithm::Fast,
            AlgorithmArg::Normal => SmoothAlgorithm::Normal,
            AlgorithmArg::Best => SmoothAlgorithm::Best,
        }
    }
}

#[derive(Args)]
pub struct RenderArgs {
    /// Input image file
    pub file: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Fixed zoom factor (1.0 = 1:1)
    #[arg(long, conflicts_with_all = ["fit", "fit_width", "fit_height"])]
    pub zoom: Option<f64>,

    /// Fit the whole image into the viewport
    #[arg(long, conflicts_with_all = ["fit_width", "fit_height"])]
    pub fit: bool,

    /// Fit the image width
    #[arg(long, conflicts_with = "fit_height")]
    pub fit_width: bool,

    /// Fit the image height
    #[arg(long)]
    pub fit_height: bool,

    /// Smoothing algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Paint unsmoothed first, then run a smoothing pass
    #[arg(long)]
    pub delayed_smoothing: bool,

    /// Gamma in percent (100 = unchanged)
    #[arg(long, default_value = "100")]
    pub gamma: i32,

    /// Brightness offset in percent (0 = unchanged)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub brightness: i32,

    /// Contrast in percent (100 = unchanged)
    #[arg(long, default_value = "100")]
    pub contrast: i32,

    /// Simulated surface depth in bits per channel
    #[arg(long, default_value = "8")]
    pub bits: u8,

    /// View config file (TOML); learned caps are written back to it
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl RenderArgs {
    fn zoom_mode(&self) -> Option<AutoZoomMode> {
        if self.fit {
            Some(AutoZoomMode::Fit)
        } else if self.fit_width {
            Some(AutoZoomMode::Width)
        } else if self.fit_height {
            Some(AutoZoomMode::Height)
        } else if self.zoom.is_some() {
            Some(AutoZoomMode::None)
        } else {
            None
        }
    }

    fn view_config(&self) -> Result<ViewConfig> {
        let mut config = match &self.config {
            Some(path) if path.exists() => ViewConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            _ => ViewConfig::default(),
        };
        if let Some(mode) = self.zoom_mode() {
            config.zoom_mode = mode;
            config.lock_zoom = false;
        }
        if let Some(algorithm) = self.algorithm {
            config.smooth_algorithm = algorithm.into();
        }
        if self.delayed_smoothing {
            config.delayed_smoothing = true;
        }
        Ok(config)
    }
}

pub fn run(args: &RenderArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("Viewport must not be empty");
    }
    let config = args.view_config()?;
    let surface = FrameSurface::new(args.width, args.height).with_bits_per_channel(args.bits);
    let mut view = ImageView::new(surface, config, BusyLevelManager::shared());
    view.resize(Size::new(args.width as i32, args.height as i32));

    let started = Instant::now();
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!("Decoding {}", args.file.display()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    view.open(&args.file);
    while view.document().is_loading() {
        view.poll();
        std::thread::sleep(Duration::from_millis(5));
    }
    view.poll();
    if view.document().is_null() {
        spinner.finish_and_clear();
        bail!("Failed to load {}", args.file.display());
    }
    let decoded = started.elapsed();

    if let Some(zoom) = args.zoom {
        view.set_zoom(zoom, None);
    }
    let adjustments = ImageAdjustments::new(args.gamma, args.brightness, args.contrast);
    if !adjustments.is_identity() {
        view.set_adjustments(adjustments);
    }

    spinner.set_message("Painting");
    let ticks = run_until_idle(&mut view, &spinner)?;
    spinner.finish_and_clear();

    view.surface()
        .frame()
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let written = view.write_config();
    if let Some(path) = &args.config {
        written
            .save(path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
    }

    let doc = view.document();
    print_render_summary(&RenderStats {
        input: &args.file,
        output: &args.output,
        image: (doc.width(), doc.height()),
        viewport: (args.width, args.height),
        zoom: view.zoom(),
        mode: view.zoom_controller().auto_mode(),
        algorithm: written.smooth_algorithm,
        ticks,
        decoded,
        total: started.elapsed(),
        caps: &written.repaint_size,
    });
    Ok(())
}

/// Play the host side of the view: hand repaint requests back as paint
/// events and tick while there is work. Returns the number of ticks.
fn run_until_idle(view: &mut ImageView<FrameSurface>, spinner: &ProgressBar) -> Result<u64> {
    let mut ticks = 0;
    for _ in 0..MAX_FRAMES {
        view.poll();
        let requests = view.surface_mut().take_repaint_requests();
        for rect in &requests {
            view.paint_event(*rect);
        }
        if view.wants_tick() {
            view.tick();
            ticks += 1;
            if ticks % 16 == 0 {
                spinner.set_message(format!("Painting ({} pending)", view.pending_paints().len()));
            }
        } else if requests.is_empty() {
            return Ok(ticks);
        }
    }
    bail!("Viewer did not settle after {} frames", MAX_FRAMES)
}
