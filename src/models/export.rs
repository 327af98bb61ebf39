//! Export Models
//!
//! Output format selection and the exported message record.

use serde::{Deserialize, Serialize};

/// Serialization format for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    /// File extension implied by the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }
}

/// One record of the exported history, chronological in the final output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedMessage {
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    /// `"You"` for self-authored messages, else the peer's display name
    pub sender: String,
    /// Media tag and/or raw text, space-joined
    pub content: String,
}

/// Final tally of a completed export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Messages seen on the wire, including ones that produced no record
    pub scanned: u64,
    /// Records written to the output file
    pub exported: u64,
}
