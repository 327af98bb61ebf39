//! Worker Events
//!
//! The only vocabulary the worker uses to talk back to the control context.
//! Serde-tagged so a frontend can consume events over IPC unchanged.

use serde::{Deserialize, Serialize};

/// Event emitted by the network worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Event {
    /// Progress text for the currently running command
    Status(String),
    /// The worker is suspended until a matching input response arrives
    InputRequested(InputRequest),
    /// The command finished successfully
    Completed(String),
    /// The command failed; the message is user-facing
    Failed(String),
    /// Show the login page with the given status message
    NavigateToLogin(String),
    /// Show the exporter page
    NavigateToExporter,
}

/// A request for one human-supplied value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRequest {
    pub title: String,
    pub prompt: String,
    /// Whether the value should be collected without echo
    pub secret: bool,
}

impl InputRequest {
    pub(crate) fn login_code() -> Self {
        Self {
            title: "Login Code".to_string(),
            prompt: "Enter the code you received in Telegram:".to_string(),
            secret: false,
        }
    }

    pub(crate) fn password() -> Self {
        Self {
            title: "Password".to_string(),
            prompt: "Enter your 2FA password:".to_string(),
            secret: true,
        }
    }
}
