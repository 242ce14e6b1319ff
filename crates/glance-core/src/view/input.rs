//! Pointer, keyboard and menu input.

use tracing::debug;

use crate::config::AutoZoomMode;
use crate::error::{GlanceError, Result};
use crate::geom::Point;
use crate::menu::{
    build_context_menu, EditCommand, FileActions, FileCommand, MenuEntry, NavigateCommand,
    ZoomCommand,
};
use crate::surface::Surface;
use crate::tool::{Modifiers, MouseButton, ToolAction, ToolMode};

use super::{ImageView, ViewEvent};

impl<S: Surface> ImageView<S> {
    /// Keyboard modifiers changed; Ctrl switches to the zoom tool.
    pub fn modifiers_changed(&mut self, modifiers: Modifiers) {
        if self.tool.select(modifiers) {
            self.zoom.set_tool(self.tool.mode());
            if self.tool.mode() == ToolMode::Zoom {
                self.emit_hint();
            }
        }
    }

    /// The pointer entered the view.
    pub fn pointer_entered(&mut self, modifiers: Modifiers) {
        self.modifiers_changed(modifiers);
        self.emit_hint();
    }

    fn emit_hint(&mut self) {
        if !self.document.is_null() {
            self.events
                .push_back(ViewEvent::RequestHint(self.tool.mode().hint()));
        }
    }

    pub fn mouse_press(&mut self, button: MouseButton, pos: Point) {
        match button {
            MouseButton::Left => self.left_down = true,
            MouseButton::Right => self.right_down = true,
            MouseButton::Middle => {}
        }
        let action = self.tool.on_press(button, pos);
        self.apply_tool_action(action);
    }

    pub fn mouse_move(&mut self, pos: Point, modifiers: Modifiers) {
        self.modifiers_changed(modifiers);
        let action = self.tool.on_move(pos);
        self.apply_tool_action(action);
    }

    /// Releasing one button while the other is held browses: left-then-right
    /// goes back, right-then-left goes forward.
    pub fn mouse_release(&mut self, button: MouseButton, pos: Point) {
        match button {
            MouseButton::Left => {
                self.left_down = false;
                if self.right_down {
                    self.opera_like_previous = true;
                    self.events.push_back(ViewEvent::SelectPrevious);
                    return;
                }
            }
            MouseButton::Right => {
                self.right_down = false;
                if self.left_down {
                    self.events.push_back(ViewEvent::SelectNext);
                    return;
                }
                if self.opera_like_previous {
                    self.opera_like_previous = false;
                    return;
                }
            }
            MouseButton::Middle => {}
        }
        let action = self.tool.on_release(button, pos);
        self.apply_tool_action(action);
    }

    pub fn mouse_double_click(&mut self) {
        if self.tool.mode() != ToolMode::Zoom {
            self.events.push_back(ViewEvent::DoubleClicked);
        }
    }

    /// `delta` in pixels, positive y away from the user.
    pub fn wheel(&mut self, delta: Point, pos: Point, modifiers: Modifiers) {
        let action = self
            .tool
            .on_wheel(delta, pos, modifiers, self.config.mouse_wheel_scroll);
        self.apply_tool_action(action);
    }

    fn apply_tool_action(&mut self, action: ToolAction) {
        match action {
            ToolAction::None => {}
            ToolAction::ScrollBy { dx, dy } => self.scroll_by(dx, dy),
            ToolAction::ZoomAt { at, zoom_in } => self.zoom_at(at, zoom_in),
            ToolAction::ToggleZoomToFit => {
                let fit = self.zoom.auto_mode() == AutoZoomMode::Fit;
                self.set_zoom_to_fit(!fit);
            }
            ToolAction::ContextMenu { at } => {
                self.events.push_back(ViewEvent::ContextMenuRequested(at))
            }
            ToolAction::SelectPrevious => self.events.push_back(ViewEvent::SelectPrevious),
            ToolAction::SelectNext => self.events.push_back(ViewEvent::SelectNext),
        }
    }

    /// Step the zoom and center the view on the image point under `at`
    /// (viewport coordinates).
    pub fn zoom_at(&mut self, at: Point, zoom_in: bool) {
        if self.document.is_null() {
            return;
        }
        let old_zoom = self.zoom.zoom();
        let offset = self.zoom.offset();
        self.zoom.note_manual_zoom();
        let zoom = self.zoom.compute_zoom(zoom_in, &self.geometry());
        let cx = (at.x + self.scroll.x - offset.x) as f64 / old_zoom * zoom;
        let cy = (at.y + self.scroll.y - offset.y) as f64 / old_zoom * zoom;
        self.set_zoom(zoom, Some(Point::new(cx as i32, cy as i32)));
    }

    // ----- menu -----

    /// Entries applicable to the current document.
    pub fn context_menu(&self) -> Vec<MenuEntry> {
        build_context_menu(!self.document.is_null(), self.document.path().is_some())
    }

    pub fn invoke_menu_entry(
        &mut self,
        entry: MenuEntry,
        actions: &mut dyn FileActions,
    ) -> Result<()> {
        match entry {
            MenuEntry::Zoom(command) => {
                match command {
                    ZoomCommand::ZoomToFit => {
                        let fit = self.zoom.auto_mode() == AutoZoomMode::Fit;
                        self.set_zoom_to_fit(!fit);
                    }
                    ZoomCommand::ZoomIn => self.zoom_in(),
                    ZoomCommand::ZoomOut => self.zoom_out(),
                    ZoomCommand::ResetZoom => self.reset_zoom(),
                    ZoomCommand::LockZoom => {
                        let lock = !self.zoom.lock_zoom();
                        self.set_lock_zoom(lock);
                    }
                }
                Ok(())
            }
            MenuEntry::Navigate(command) => {
                self.events.push_back(match command {
                    NavigateCommand::First => ViewEvent::SelectFirst,
                    NavigateCommand::Previous => ViewEvent::SelectPrevious,
                    NavigateCommand::Next => ViewEvent::SelectNext,
                    NavigateCommand::Last => ViewEvent::SelectLast,
                });
                Ok(())
            }
            MenuEntry::Edit(command) => self.apply_edit(command),
            MenuEntry::File(command) => self.invoke_file_action(command, actions),
            MenuEntry::Separator => Ok(()),
        }
    }

    /// Hand `command` and the document's path to the host.
    pub fn invoke_file_action(
        &mut self,
        command: FileCommand,
        actions: &mut dyn FileActions,
    ) -> Result<()> {
        let path = self.document.path().ok_or(GlanceError::NoDocument)?;
        debug!(?command, path = %path.display(), "file action");
        actions.invoke(command, path)
    }

    /// Rotate or mirror the image in place.
    pub fn apply_edit(&mut self, command: EditCommand) -> Result<()> {
        self.document.modify(|raster| *raster = command.apply(raster))?;
        self.poll_document();
        Ok(())
    }
}
