//! Previous/next navigation among the images of a directory.

use std::path::{Path, PathBuf};

use glance_core::view::ViewEvent;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp", "tga", "pnm", "ppm", "pgm", "qoi",
    "ico",
];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Sorted image files next to `path`, `path` included.
pub fn sibling_images(path: &Path) -> Vec<PathBuf> {
    let Some(dir) = path.parent() else {
        return vec![path.to_path_buf()];
    };
    let mut files: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_image(p))
            .collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}

/// The file a navigation event selects, if it differs from `current`.
pub fn select(current: &Path, event: &ViewEvent) -> Option<PathBuf> {
    let mut files = sibling_images(current);
    if files.is_empty() {
        return None;
    }
    let index = files.iter().position(|p| p == current);
    let last = files.len() - 1;
    let target = match (event, index) {
        (ViewEvent::SelectFirst, _) => 0,
        (ViewEvent::SelectLast, _) => last,
        (ViewEvent::SelectPrevious, Some(i)) => i.checked_sub(1)?,
        (ViewEvent::SelectNext, Some(i)) if i < last => i + 1,
        (ViewEvent::SelectNext, None) => 0,
        _ => return None,
    };
    let path = files.swap_remove(target);
    (Some(target) != index).then_some(path)
}
