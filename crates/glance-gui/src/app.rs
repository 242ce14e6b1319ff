use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use glance_core::busy::{BusyLevelManager, SharedBusyService};
use glance_core::config::ViewConfig;
use glance_core::menu::MenuEntry;
use glance_core::surface::FrameSurface;
use glance_core::view::{ImageView, ViewEvent};
use tracing::warn;

use crate::browse;
use crate::convert::frame_to_color_image;
use crate::file_actions::{DialogFileActions, Outcome};
use crate::panels;
use crate::state::{UIState, ViewportState};

/// Time spent ticking the view per frame before yielding to the event loop.
const TICK_BUDGET: Duration = Duration::from_millis(12);

const CONFIG_FILE: &str = "glance.toml";

pub struct GlanceApp {
    pub view: ImageView<FrameSurface>,
    pub busy: SharedBusyService,
    pub viewport: ViewportState,
    pub ui_state: UIState,
    open_tx: mpsc::Sender<PathBuf>,
    open_rx: mpsc::Receiver<PathBuf>,
}

fn load_config(path: &Path) -> ViewConfig {
    if !path.exists() {
        return ViewConfig::default();
    }
    ViewConfig::load(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
        ViewConfig::default()
    })
}

impl GlanceApp {
    pub fn new(initial: Option<PathBuf>) -> Self {
        let config_path = PathBuf::from(CONFIG_FILE);
        let busy = BusyLevelManager::shared();
        let view = ImageView::new(FrameSurface::new(1, 1), load_config(&config_path), busy.clone());
        let (open_tx, open_rx) = mpsc::channel();

        let mut app = Self {
            view,
            busy,
            viewport: ViewportState::default(),
            ui_state: UIState {
                config_path,
                ..UIState::default()
            },
            open_tx,
            open_rx,
        };
        if let Some(path) = initial {
            app.open(&path);
        }
        app
    }

    pub fn open(&mut self, path: &Path) {
        self.ui_state.add_log(format!("Opened: {}", path.display()));
        self.view.open(path);
    }

    /// Show a file dialog off the UI thread; the choice arrives next frame.
    pub fn open_dialog(&self) {
        let open_tx = self.open_tx.clone();
        let start = self
            .view
            .document()
            .path()
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        std::thread::spawn(move || {
            let mut dialog = rfd::FileDialog::new()
                .add_filter(
                    "Images",
                    &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"],
                )
                .add_filter("All files", &["*"]);
            if let Some(dir) = start {
                dialog = dialog.set_directory(dir);
            }
            if let Some(path) = dialog.pick_file() {
                let _ = open_tx.send(path);
            }
        });
    }

    fn poll_open_requests(&mut self) {
        while let Ok(path) = self.open_rx.try_recv() {
            self.open(&path);
        }
    }

    pub fn save_settings(&mut self) {
        let path = self.ui_state.config_path.clone();
        match self.view.write_config().save(&path) {
            Ok(()) => self
                .ui_state
                .add_log(format!("Settings saved to {}", path.display())),
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    /// Run a context-menu or menu-bar entry through the view.
    pub fn invoke_entry(&mut self, entry: MenuEntry) {
        let current = self.view.document().path().map(Path::to_path_buf);
        let mut actions = DialogFileActions::new();
        if let Err(e) = self.view.invoke_menu_entry(entry, &mut actions) {
            self.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
        match actions.outcome {
            Outcome::Unchanged => {}
            Outcome::Moved(path) => self.open(&path),
            Outcome::Deleted => {
                if let Some(next) = current.and_then(|p| browse::select(&p, &ViewEvent::SelectNext)) {
                    self.open(&next);
                }
            }
            Outcome::Properties(text) => self.ui_state.properties = Some(text),
        }
        self.handle_view_events_now();
    }

    /// Navigation entries are answered with events; act on them right away.
    fn handle_view_events_now(&mut self) {
        for event in self.view.drain_events() {
            self.handle_view_event(None, event);
        }
    }

    fn handle_view_event(&mut self, ctx: Option<&egui::Context>, event: ViewEvent) {
        match event {
            ViewEvent::ZoomChanged(_) => {}
            ViewEvent::SelectFirst
            | ViewEvent::SelectPrevious
            | ViewEvent::SelectNext
            | ViewEvent::SelectLast => {
                let target = self
                    .view
                    .document()
                    .path()
                    .and_then(|current| browse::select(current, &event));
                if let Some(path) = target {
                    self.open(&path);
                }
            }
            ViewEvent::DoubleClicked => {
                if let Some(ctx) = ctx {
                    self.toggle_fullscreen(ctx);
                }
            }
            ViewEvent::ContextMenuRequested(at) => {
                let ppp = self.viewport.pixels_per_point;
                self.ui_state.context_menu_at = Some(
                    self.viewport.origin + egui::vec2(at.x as f32 / ppp, at.y as f32 / ppp),
                );
            }
            ViewEvent::RequestHint(hint) => self.ui_state.hint = hint.to_string(),
        }
    }

    pub fn toggle_fullscreen(&mut self, ctx: &egui::Context) {
        self.ui_state.fullscreen = !self.ui_state.fullscreen;
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(self.ui_state.fullscreen));
    }

    /// Answer repaint requests, then tick until idle or out of budget.
    pub fn pump_view(&mut self) {
        for rect in self.view.surface_mut().take_repaint_requests() {
            self.view.paint_event(rect);
        }
        let started = Instant::now();
        while self.view.wants_tick() && started.elapsed() < TICK_BUDGET {
            self.view.tick();
        }
    }

    /// Re-upload the framebuffer if the view drew into it.
    pub fn update_texture(&mut self, ctx: &egui::Context) {
        if !self.view.surface_mut().take_dirty() {
            return;
        }
        let image = frame_to_color_image(self.view.surface().frame());
        match &mut self.viewport.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.viewport.texture =
                    Some(ctx.load_texture("viewport", image, egui::TextureOptions::NEAREST));
            }
        }
    }

    fn show_context_menu(&mut self, ctx: &egui::Context) {
        let Some(pos) = self.ui_state.context_menu_at else {
            return;
        };
        let entries = self.view.context_menu();
        let mut chosen = None;
        let area = egui::Area::new(egui::Id::new("context_menu"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::menu(ui.style()).show(ui, |ui| {
                    for entry in entries {
                        if entry == MenuEntry::Separator {
                            ui.separator();
                        } else if ui.button(entry.label()).clicked() {
                            chosen = Some(entry);
                        }
                    }
                });
            });
        if chosen.is_some() || area.response.clicked_elsewhere() {
            self.ui_state.context_menu_at = None;
        }
        if let Some(entry) = chosen {
            self.invoke_entry(entry);
        }
    }

    fn show_properties(&mut self, ctx: &egui::Context) {
        let Some(text) = self.ui_state.properties.clone() else {
            return;
        };
        let mut open = true;
        egui::Window::new("Properties")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.monospace(text);
            });
        if !open {
            self.ui_state.properties = None;
        }
    }
}

impl eframe::App for GlanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_open_requests();
        self.view.poll();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        for event in self.view.drain_events() {
            self.handle_view_event(Some(ctx), event);
        }
        self.show_context_menu(ctx);
        self.show_properties(ctx);

        if self.ui_state.show_about {
            egui::Window::new("About Glance")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Glance");
                        ui.label("Progressive Image Viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }

        if self.view.wants_tick() || self.view.document().is_loading() {
            ctx.request_repaint();
        }
    }
}
