//! Storage Layer
//!
//! Handles all data persistence: the JSON credential file and the opaque
//! session artifact.

pub mod credentials;
pub mod session;

pub use credentials::*;
pub use session::*;
