//! Dialog-backed file operations for the context menu.

use std::path::{Path, PathBuf};

use glance_core::error::{GlanceError, Result};
use glance_core::menu::{FileActions, FileCommand};
use tracing::info;

/// What the last action did to the current file, for the app to follow up.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Unchanged,
    Moved(PathBuf),
    Deleted,
    Properties(String),
}

pub struct DialogFileActions {
    pub outcome: Outcome,
}

impl DialogFileActions {
    pub fn new() -> Self {
        Self {
            outcome: Outcome::Unchanged,
        }
    }
}

fn failed(command: FileCommand, err: impl std::fmt::Display) -> GlanceError {
    GlanceError::FileAction {
        command: command.label().trim_end_matches("...").to_string(),
        message: err.to_string(),
    }
}

fn pick_target(path: &Path, title: &str) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title(title);
    if let Some(dir) = path.parent() {
        dialog = dialog.set_directory(dir);
    }
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        dialog = dialog.set_file_name(name);
    }
    dialog.save_file().filter(|target| target != path)
}

/// `rename` first, copy-then-delete across filesystems.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)
}

fn describe(path: &Path) -> std::io::Result<String> {
    let meta = std::fs::metadata(path)?;
    let modified = meta
        .modified()
        .ok()
        .and_then(|t| t.elapsed().ok())
        .map(|age| format!("{} minutes ago", age.as_secs() / 60))
        .unwrap_or_else(|| "unknown".into());
    Ok(format!(
        "Name:      {}\nFolder:    {}\nSize:      {:.1} KB\nModified:  {}\nRead-only: {}",
        path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default(),
        path.parent().map(|p| p.display().to_string()).unwrap_or_default(),
        meta.len() as f64 / 1024.0,
        modified,
        meta.permissions().readonly(),
    ))
}

impl FileActions for DialogFileActions {
    fn invoke(&mut self, command: FileCommand, path: &Path) -> Result<()> {
        self.outcome = Outcome::Unchanged;
        match command {
            FileCommand::Rename | FileCommand::MoveTo => {
                let Some(target) = pick_target(path, command.label()) else {
                    return Ok(());
                };
                move_file(path, &target).map_err(|e| failed(command, e))?;
                info!(from = %path.display(), to = %target.display(), "file moved");
                self.outcome = Outcome::Moved(target);
            }
            FileCommand::CopyTo => {
                let Some(target) = pick_target(path, command.label()) else {
                    return Ok(());
                };
                std::fs::copy(path, &target).map_err(|e| failed(command, e))?;
                info!(from = %path.display(), to = %target.display(), "file copied");
            }
            FileCommand::Delete => {
                let confirmed = rfd::MessageDialog::new()
                    .set_title("Delete")
                    .set_description(format!("Delete {}?", path.display()))
                    .set_buttons(rfd::MessageButtons::YesNo)
                    .show();
                if confirmed != rfd::MessageDialogResult::Yes {
                    return Ok(());
                }
                std::fs::remove_file(path).map_err(|e| failed(command, e))?;
                info!(path = %path.display(), "file deleted");
                self.outcome = Outcome::Deleted;
            }
            FileCommand::Properties => {
                let text = describe(path).map_err(|e| failed(command, e))?;
                self.outcome = Outcome::Properties(text);
            }
        }
        Ok(())
    }
}
