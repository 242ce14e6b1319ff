use crate::geom::Point;

/// Notifications the view sends to its host.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    ZoomChanged(f64),
    SelectFirst,
    SelectPrevious,
    SelectNext,
    SelectLast,
    DoubleClicked,
    /// Right click with the scroll tool, in viewport coordinates.
    ContextMenuRequested(Point),
    /// Status-bar text describing the active tool.
    RequestHint(&'static str),
}

/// Arrow keys; each scrolls by half the widget size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollKey {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollKey {
    pub(super) fn direction(self) -> (i32, i32) {
        match self {
            ScrollKey::Up => (0, -1),
            ScrollKey::Down => (0, 1),
            ScrollKey::Left => (-1, 0),
            ScrollKey::Right => (1, 0),
        }
    }
}
