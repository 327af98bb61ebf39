//! Services
//!
//! Business logic of the exporter: the network worker with its command/event
//! bridge, the authentication flow, the export pipeline, and the small host
//! effects around them.

pub mod auth;
pub mod exporter;
pub mod input;
pub mod viewer;
pub mod worker;

pub use input::{InputGate, InputResponse};
pub use worker::{EventReceiver, Worker, WorkerHandle};
