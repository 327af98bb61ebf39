//! Credential Store
//!
//! Reads and writes the persisted credential record. The file holds exactly
//! the two fields of [`Credentials`]; a missing file is a normal state, not
//! an error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::credentials::Credentials;
use crate::utils::error::AppResult;

/// File name of the credential record inside the data directory
pub const CREDENTIALS_FILE_NAME: &str = "config.json";

/// Store for the persisted API credentials
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CREDENTIALS_FILE_NAME),
        }
    }

    /// Load the stored credentials, or `None` when no file exists
    pub fn load(&self) -> AppResult<Option<Credentials>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let credentials: Credentials = serde_json::from_str(&content)?;
        Ok(Some(credentials))
    }

    /// Save credentials with pretty formatting
    pub fn save(&self, credentials: &Credentials) -> AppResult<()> {
        let content = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Delete the credential file; absence is not an error
    pub fn delete(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Whether a credential file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
