use std::path::PathBuf;

/// Viewport display state.
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Size in pixels the view was last resized to.
    pub size: [u32; 2],
    /// Screen position of the viewport's top-left corner.
    pub origin: egui::Pos2,
    pub pixels_per_point: f32,
    pub hovered: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            texture: None,
            size: [0, 0],
            origin: egui::Pos2::ZERO,
            pixels_per_point: 1.0,
            hovered: false,
        }
    }
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    /// Where settings are read from and written to.
    pub config_path: PathBuf,
    /// Tool hint shown in the status bar.
    pub hint: String,
    /// Context menu anchor in screen coordinates, while open.
    pub context_menu_at: Option<egui::Pos2>,
    /// Text of the properties window, while open.
    pub properties: Option<String>,
    pub fullscreen: bool,
    pub show_about: bool,
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn last_log(&self) -> Option<&str> {
        self.log_messages.last().map(String::as_str)
    }
}
