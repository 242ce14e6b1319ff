//! Context-menu model and the file-action seam.
//!
//! The view decides which entries make sense for the current document; the
//! host renders them and feeds the chosen one back through
//! `ImageView::invoke_menu_entry`.

use std::path::Path;

use image::imageops;

use crate::error::Result;
use crate::raster::{rgba_image_to_array, Raster};

/// Operations on the file behind the document. Dialogs, confirmation and
/// I/O belong to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileCommand {
    Rename,
    CopyTo,
    MoveTo,
    Delete,
    Properties,
}

impl FileCommand {
    pub const ALL: [FileCommand; 5] = [
        FileCommand::Rename,
        FileCommand::CopyTo,
        FileCommand::MoveTo,
        FileCommand::Delete,
        FileCommand::Properties,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FileCommand::Rename => "Rename...",
            FileCommand::CopyTo => "Copy To...",
            FileCommand::MoveTo => "Move To...",
            FileCommand::Delete => "Delete",
            FileCommand::Properties => "Properties",
        }
    }
}

/// In-place pixel edits offered for a loaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditCommand {
    RotateLeft,
    RotateRight,
    Mirror,
    Flip,
}

impl EditCommand {
    pub const ALL: [EditCommand; 4] = [
        EditCommand::RotateLeft,
        EditCommand::RotateRight,
        EditCommand::Mirror,
        EditCommand::Flip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditCommand::RotateLeft => "Rotate Left",
            EditCommand::RotateRight => "Rotate Right",
            EditCommand::Mirror => "Mirror",
            EditCommand::Flip => "Flip",
        }
    }

    /// Return the edited copy of `raster`.
    pub fn apply(self, raster: &Raster) -> Raster {
        let img = raster.to_rgba_image();
        let edited = match self {
            EditCommand::RotateLeft => imageops::rotate270(&img),
            EditCommand::RotateRight => imageops::rotate90(&img),
            EditCommand::Mirror => imageops::flip_horizontal(&img),
            EditCommand::Flip => imageops::flip_vertical(&img),
        };
        Raster::new(rgba_image_to_array(edited), raster.has_alpha)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomCommand {
    ZoomToFit,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    LockZoom,
}

impl ZoomCommand {
    pub fn label(self) -> &'static str {
        match self {
            ZoomCommand::ZoomToFit => "Fit to Window",
            ZoomCommand::ZoomIn => "Zoom In",
            ZoomCommand::ZoomOut => "Zoom Out",
            ZoomCommand::ResetZoom => "Actual Size",
            ZoomCommand::LockZoom => "Lock Zoom",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigateCommand {
    First,
    Previous,
    Next,
    Last,
}

impl NavigateCommand {
    pub const ALL: [NavigateCommand; 4] = [
        NavigateCommand::First,
        NavigateCommand::Previous,
        NavigateCommand::Next,
        NavigateCommand::Last,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavigateCommand::First => "First",
            NavigateCommand::Previous => "Previous",
            NavigateCommand::Next => "Next",
            NavigateCommand::Last => "Last",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Zoom(ZoomCommand),
    Navigate(NavigateCommand),
    Edit(EditCommand),
    File(FileCommand),
    Separator,
}

impl MenuEntry {
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Zoom(c) => c.label(),
            MenuEntry::Navigate(c) => c.label(),
            MenuEntry::Edit(c) => c.label(),
            MenuEntry::File(c) => c.label(),
            MenuEntry::Separator => "",
        }
    }
}

/// Entries for a document that holds a valid image and/or has a file.
pub fn build_context_menu(valid_image: bool, has_file: bool) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    if valid_image {
        entries.extend(
            [
                ZoomCommand::ZoomToFit,
                ZoomCommand::ZoomIn,
                ZoomCommand::ZoomOut,
                ZoomCommand::ResetZoom,
                ZoomCommand::LockZoom,
            ]
            .map(MenuEntry::Zoom),
        );
        entries.push(MenuEntry::Separator);
    }
    entries.extend(NavigateCommand::ALL.map(MenuEntry::Navigate));
    if valid_image {
        entries.push(MenuEntry::Separator);
        entries.extend(EditCommand::ALL.map(MenuEntry::Edit));
    }
    if has_file {
        entries.push(MenuEntry::Separator);
        entries.extend(FileCommand::ALL[..4].iter().copied().map(MenuEntry::File));
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::File(FileCommand::Properties));
    }
    entries
}

/// Host-side implementation of the file commands.
pub trait FileActions {
    fn invoke(&mut self, command: FileCommand, path: &Path) -> Result<()>;
}
