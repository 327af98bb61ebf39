//! Telegram Chat Exporter - Backend Core
//!
//! This library provides the backend of the chat exporter desktop
//! application. It includes:
//! - The network worker and its command/event bridge toward the UI
//! - The authentication flow (session probe, code login, second factor)
//! - The streaming export pipeline (text and JSON output)
//! - Storage for the credential record and the opaque session artifact
//!
//! The GUI shell and the concrete platform client live outside this crate:
//! the frontend drives [`WorkerHandle`] and renders [`Event`]s, and the
//! platform backend plugs in through [`client::SessionClientFactory`].

pub mod client;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::command::{ExportRequest, LoginRequest};
pub use models::credentials::Credentials;
pub use models::event::{Event, InputRequest};
pub use models::export::{ExportFormat, ExportReport, ExportedMessage};
pub use models::session::SessionState;
pub use services::input::InputResponse;
pub use services::worker::{EventReceiver, Worker, WorkerHandle};
pub use storage::credentials::CredentialStore;
pub use storage::session::SessionArtifact;
pub use utils::error::{AppError, AppResult};
pub use utils::paths::default_data_dir;
