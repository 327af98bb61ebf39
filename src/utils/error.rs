//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use crate::client::ClientError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field is missing or malformed; rejected before the command
    /// reaches the worker queue
    #[error("Validation error: {0}")]
    Validation(String),

    /// Connect or authorization-check failure; routes back to the login page
    #[error("Session error: {0}")]
    Session(String),

    /// Sign-in failure (bad code, wrong password)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Target conversation could not be resolved
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// An input response arrived with no request outstanding
    #[error("No input request is pending")]
    NoPendingInput,

    /// The worker task has already terminated
    #[error("Worker is no longer running")]
    WorkerGone,

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::SignIn(msg) => AppError::Auth(msg),
            other @ ClientError::PeerNotFound(_) => AppError::Resolution(other.to_string()),
            other => AppError::Session(other.to_string()),
        }
    }
}
