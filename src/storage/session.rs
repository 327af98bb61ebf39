//! Session Artifact
//!
//! The opaque file a client backend uses to reconnect without
//! re-authentication. The core only probes for existence and deletes it on
//! logout; its contents belong to the backend.

use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::AppResult;

/// File name of the session artifact inside the data directory
pub const SESSION_FILE_NAME: &str = "telegram.session";

/// Handle to the on-disk session artifact
#[derive(Debug, Clone)]
pub struct SessionArtifact {
    path: PathBuf,
}

impl SessionArtifact {
    /// Create a handle rooted at the given data directory
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE_NAME),
        }
    }

    /// Path handed to the client backend
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an artifact exists from a previous run
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the artifact; absence is not an error
    pub fn delete(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
