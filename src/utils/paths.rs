//! Cross-Platform Path Utilities
//!
//! Functions for resolving the application data directory.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::session("Could not determine home directory"))
}

/// Get the exporter data directory (~/.tg-exporter/)
pub fn default_data_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".tg-exporter"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
