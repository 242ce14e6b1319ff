//! Pointer tools: scrolling (default) and zooming (while Ctrl is held).
//!
//! A tool turns raw pointer input into a [`ToolAction`]; the view performs
//! the action. The two variants share one state struct since the only state
//! either needs is the drag anchor.

use crate::geom::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolMode {
    #[default]
    Scroll,
    Zoom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

/// Cursor the host should show over the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    OpenHand,
    ClosedHand,
    ZoomIn,
}

/// What a tool wants the view to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToolAction {
    None,
    /// Scroll the content by this many widget pixels.
    ScrollBy { dx: i32, dy: i32 },
    /// Step the zoom, keeping the image point under `at` (viewport coordinates) fixed.
    ZoomAt { at: Point, zoom_in: bool },
    ToggleZoomToFit,
    ContextMenu { at: Point },
    SelectPrevious,
    SelectNext,
}

impl ToolMode {
    /// Ctrl selects the zoom tool.
    pub fn for_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.ctrl {
            ToolMode::Zoom
        } else {
            ToolMode::Scroll
        }
    }

    /// Status-bar hint describing the tool.
    pub fn hint(self) -> &'static str {
        match self {
            ToolMode::Scroll => "Drag to scroll, hold Ctrl to zoom",
            ToolMode::Zoom => {
                "Left click to zoom in, right click to zoom out. You can also use the mouse wheel."
            }
        }
    }
}

/// Active tool plus the drag anchor.
#[derive(Clone, Debug, Default)]
pub struct Tool {
    mode: ToolMode,
    drag_anchor: Option<Point>,
}

impl Tool {
    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    /// Switch tool for the current modifiers. Returns true when the tool changed.
    pub fn select(&mut self, modifiers: Modifiers) -> bool {
        let mode = ToolMode::for_modifiers(modifiers);
        let changed = mode != self.mode;
        self.mode = mode;
        changed
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match self.mode {
            ToolMode::Scroll if self.drag_anchor.is_some() => CursorHint::ClosedHand,
            ToolMode::Scroll => CursorHint::OpenHand,
            ToolMode::Zoom => CursorHint::ZoomIn,
        }
    }

    pub fn on_press(&mut self, button: MouseButton, pos: Point) -> ToolAction {
        if self.mode == ToolMode::Scroll && button == MouseButton::Left {
            self.drag_anchor = Some(pos);
        }
        ToolAction::None
    }

    pub fn on_move(&mut self, pos: Point) -> ToolAction {
        match (self.mode, self.drag_anchor) {
            (ToolMode::Scroll, Some(anchor)) => {
                self.drag_anchor = Some(pos);
                ToolAction::ScrollBy {
                    dx: anchor.x - pos.x,
                    dy: anchor.y - pos.y,
                }
            }
            _ => ToolAction::None,
        }
    }

    pub fn on_release(&mut self, button: MouseButton, pos: Point) -> ToolAction {
        match (self.mode, button) {
            (ToolMode::Scroll, MouseButton::Left) => {
                self.drag_anchor = None;
                ToolAction::None
            }
            (ToolMode::Scroll, MouseButton::Middle) => ToolAction::ToggleZoomToFit,
            (ToolMode::Scroll, MouseButton::Right) => ToolAction::ContextMenu { at: pos },
            (ToolMode::Zoom, MouseButton::Left) => ToolAction::ZoomAt { at: pos, zoom_in: true },
            (ToolMode::Zoom, MouseButton::Right) => ToolAction::ZoomAt {
                at: pos,
                zoom_in: false,
            },
            (ToolMode::Zoom, MouseButton::Middle) => ToolAction::None,
        }
    }

    /// `delta` is the wheel movement in widget pixels (positive y = away from
    /// the user). With `wheel_scrolls` off the scroll tool browses images.
    pub fn on_wheel(
        &mut self,
        delta: Point,
        pos: Point,
        modifiers: Modifiers,
        wheel_scrolls: bool,
    ) -> ToolAction {
        match self.mode {
            ToolMode::Zoom => {
                if delta.y == 0 {
                    return ToolAction::None;
                }
                ToolAction::ZoomAt {
                    at: pos,
                    zoom_in: delta.y > 0,
                }
            }
            ToolMode::Scroll if wheel_scrolls => {
                if modifiers.shift {
                    ToolAction::ScrollBy {
                        dx: -delta.y,
                        dy: -delta.x,
                    }
                } else {
                    ToolAction::ScrollBy {
                        dx: -delta.x,
                        dy: -delta.y,
                    }
                }
            }
            ToolMode::Scroll => {
                if delta.y > 0 {
                    ToolAction::SelectPrevious
                } else if delta.y < 0 {
                    ToolAction::SelectNext
                } else {
                    ToolAction::None
                }
            }
        }
    }
}
