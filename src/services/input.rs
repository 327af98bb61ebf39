//! Suspend-for-Input Gate
//!
//! Single-slot handoff for the one human-supplied value the worker may be
//! waiting on. The worker arms the gate and blocks on the receiver; the
//! control context fulfills it exactly once. Taking the sender out of the
//! slot on delivery makes a second response impossible by construction.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

use crate::utils::error::{AppError, AppResult};

/// The value delivered for an input request; `None` means the user cancelled
pub type InputResponse = Option<String>;

/// Shared single-slot input handshake between worker and control context
#[derive(Debug, Clone, Default)]
pub struct InputGate {
    slot: Arc<Mutex<Option<oneshot::Sender<InputResponse>>>>,
}

impl InputGate {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<oneshot::Sender<InputResponse>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Arm the gate for one request and hand back the receiver to block on.
    /// Commands are serialized, so at most one request is ever outstanding.
    pub(crate) fn arm(&self) -> oneshot::Receiver<InputResponse> {
        let (tx, rx) = oneshot::channel();
        let mut slot = self.slot();
        debug_assert!(slot.is_none(), "input request already outstanding");
        *slot = Some(tx);
        rx
    }

    /// Clear a request that will never be answered (shutdown unwinding)
    pub(crate) fn disarm(&self) {
        self.slot().take();
    }

    /// Deliver the response for the outstanding request. Fails with
    /// [`AppError::NoPendingInput`] when nothing is pending, which also
    /// covers a second delivery for the same request.
    pub fn respond(&self, value: InputResponse) -> AppResult<()> {
        let sender = self.slot().take().ok_or(AppError::NoPendingInput)?;
        // The receiver side may already be gone if the worker shut down
        // mid-request; the response is moot then.
        let _ = sender.send(value);
        Ok(())
    }
}
