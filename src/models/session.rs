//! Session Lifecycle
//!
//! Coarse state of the one live platform session, tracked by the worker for
//! logging and teardown decisions.

/// Lifecycle of the worker-owned session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No client exists
    Absent,
    /// A client exists and a connect attempt is underway
    Connecting,
    /// Connected and authorized; exports may run
    Authorized,
    /// Connected but the session artifact is invalid or expired
    Unauthorized,
    /// The client was connected earlier and has been torn down
    Disconnected,
}
