//! Open-in-Viewer Effect
//!
//! Asks the host environment to open a finished export with its default
//! handler. Strictly best-effort: a missing opener is a warning, never a
//! pipeline failure.

use std::path::Path;
use std::process::Command;

use tracing::warn;

/// Open the file with the platform's default application
pub fn open_in_viewer(path: &Path) {
    if let Err(err) = try_open(path) {
        warn!(path = %path.display(), %err, "could not open file automatically");
    }
}

fn try_open(path: &Path) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.arg("/C").arg("start").arg("").arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    };
    command.spawn().map(|_| ())
}
