//! Worker Commands
//!
//! Requests the control context submits to the network worker. Validation is
//! synchronous and happens before a request is enqueued; the worker only ever
//! sees well-formed commands.

use serde::{Deserialize, Serialize};

use crate::models::credentials::Credentials;
use crate::models::export::ExportFormat;
use crate::utils::error::{AppError, AppResult};

/// A unit of work for the network worker, processed strictly one at a time
#[derive(Debug, Clone)]
pub enum Command {
    Login(LoginRequest),
    Export(ExportRequest),
    Logout,
}

/// Login form contents as typed by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub api_id: String,
    pub api_hash: String,
    pub phone: String,
}

impl LoginRequest {
    /// Check that every field is present and `api_id` is numeric
    pub fn validate(&self) -> AppResult<()> {
        if self.api_id.trim().is_empty()
            || self.api_hash.trim().is_empty()
            || self.phone.trim().is_empty()
        {
            return Err(AppError::validation("All fields are required."));
        }
        self.parsed_api_id().map(|_| ())
    }

    /// The numeric API id
    pub fn parsed_api_id(&self) -> AppResult<i64> {
        self.api_id
            .trim()
            .parse()
            .map_err(|_| AppError::validation("API ID must be a number."))
    }

    /// The credential record to persist once this login succeeds
    pub fn credentials(&self) -> AppResult<Credentials> {
        Ok(Credentials {
            api_id: self.parsed_api_id()?,
            api_hash: self.api_hash.clone(),
        })
    }
}

/// Export form contents as typed by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Username, phone number, or handle of the target conversation
    pub target: String,
    /// Output file name, with or without extension
    pub output_name: String,
    pub format: ExportFormat,
}

impl ExportRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.target.trim().is_empty() || self.output_name.trim().is_empty() {
            return Err(AppError::validation(
                "Target username and output file are required.",
            ));
        }
        Ok(())
    }
}
