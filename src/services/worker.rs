//! Network Worker
//!
//! The one execution context that owns the session client and performs all
//! network I/O. Commands arrive over an unbounded channel and are processed
//! strictly one at a time; events flow back fire-and-forget, so the worker
//! never blocks on control-context scheduling. The single documented blocking
//! point is the suspend-for-input handshake during login.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::{SessionClient, SessionClientFactory};
use crate::models::command::{Command, ExportRequest, LoginRequest};
use crate::models::event::{Event, InputRequest};
use crate::models::session::SessionState;
use crate::services::input::{InputGate, InputResponse};
use crate::storage::credentials::CredentialStore;
use crate::storage::session::SessionArtifact;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Control-context end of the event channel
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Fire-and-forget event emitter toward the control context
#[derive(Debug, Clone)]
pub(crate) struct EventSender(mpsc::UnboundedSender<Event>);

impl EventSender {
    pub(crate) fn emit(&self, event: Event) {
        debug!(?event, "worker event");
        // A dropped receiver means the control context is gone; events are
        // not retried.
        let _ = self.0.send(event);
    }

    pub(crate) fn status(&self, text: impl Into<String>) {
        self.emit(Event::Status(text.into()));
    }

    pub(crate) fn completed(&self, text: impl Into<String>) {
        self.emit(Event::Completed(text.into()));
    }

    pub(crate) fn failed(&self, text: impl Into<String>) {
        self.emit(Event::Failed(text.into()));
    }

    pub(crate) fn navigate_to_login(&self, text: impl Into<String>) {
        self.emit(Event::NavigateToLogin(text.into()));
    }

    pub(crate) fn navigate_to_exporter(&self) {
        self.emit(Event::NavigateToExporter);
    }
}

/// Control-side handle to the network worker.
///
/// Submitting a command validates it synchronously and enqueues it without
/// blocking; the worker drains the queue one command at a time. Shutdown and
/// input responses travel out-of-band so they stay deliverable while a
/// command is in flight.
pub struct WorkerHandle {
    commands: mpsc::UnboundedSender<Command>,
    input: InputGate,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Start the login flow
    pub fn login(&self, request: LoginRequest) -> AppResult<()> {
        request.validate()?;
        self.submit(Command::Login(request))
    }

    /// Start an export
    pub fn export(&self, request: ExportRequest) -> AppResult<()> {
        request.validate()?;
        self.submit(Command::Export(request))
    }

    /// Disconnect and discard the stored credentials and session artifact
    pub fn logout(&self) -> AppResult<()> {
        self.submit(Command::Logout)
    }

    /// Answer the outstanding input request; `None` means the user cancelled
    pub fn respond_input(&self, value: InputResponse) -> AppResult<()> {
        self.input.respond(value)
    }

    /// Request worker teardown. Always valid, even while a command is in
    /// flight; a pending input wait is interrupted and unwound.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Wait for the worker task to finish tearing down. Call after
    /// [`shutdown`](Self::shutdown) so the network session and any open file
    /// handles are released before the process exits.
    pub async fn join(self) {
        if let Err(err) = self.task.await {
            warn!(%err, "worker task ended abnormally");
        }
    }

    fn submit(&self, command: Command) -> AppResult<()> {
        self.commands.send(command).map_err(|_| AppError::WorkerGone)
    }
}

/// The network worker; owns the session client for its whole lifetime
pub struct Worker {
    pub(crate) factory: Arc<dyn SessionClientFactory>,
    pub(crate) client: Option<Box<dyn SessionClient>>,
    pub(crate) state: SessionState,
    pub(crate) store: CredentialStore,
    pub(crate) artifact: SessionArtifact,
    pub(crate) events: EventSender,
    pub(crate) input: InputGate,
    pub(crate) shutdown: CancellationToken,
}

impl Worker {
    /// Spawn the worker task. The data directory holds the credential file
    /// and the session artifact; it is created if missing. On startup the
    /// worker probes the persisted session and emits the first navigation
    /// event before it begins draining commands.
    pub fn spawn(
        factory: Arc<dyn SessionClientFactory>,
        data_dir: PathBuf,
    ) -> AppResult<(WorkerHandle, EventReceiver)> {
        ensure_dir(&data_dir)?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let input = InputGate::new();
        let shutdown = CancellationToken::new();

        let worker = Worker {
            factory,
            client: None,
            state: SessionState::Absent,
            store: CredentialStore::new(&data_dir),
            artifact: SessionArtifact::new(&data_dir),
            events: EventSender(event_tx),
            input: input.clone(),
            shutdown: shutdown.clone(),
        };
        let task = tokio::spawn(worker.run(command_rx));

        let handle = WorkerHandle {
            commands: command_tx,
            input,
            shutdown,
            task,
        };
        Ok((handle, event_rx))
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!("network worker started");
        self.check_startup_session().await;

        let shutdown = self.shutdown.clone();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
            }
        }

        self.teardown().await;
        info!("network worker stopped");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Login(request) => self.handle_login(request).await,
            Command::Export(request) => self.handle_export(request).await,
            Command::Logout => self.handle_logout().await,
        }
    }

    /// Emit an input request and suspend this task until the control context
    /// answers, or until shutdown interrupts the wait (treated as cancel).
    pub(crate) async fn wait_for_input(&self, request: InputRequest) -> InputResponse {
        let receiver = self.input.arm();
        self.events.emit(Event::InputRequested(request));
        tokio::select! {
            _ = self.shutdown.cancelled() => {
                self.input.disarm();
                None
            }
            response = receiver => response.unwrap_or(None),
        }
    }

    pub(crate) fn client_mut(&mut self) -> AppResult<&mut Box<dyn SessionClient>> {
        self.client
            .as_mut()
            .ok_or_else(|| AppError::session("No live session"))
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        debug!(from = ?self.state, to = ?state, "session state");
        self.state = state;
    }

    /// Disconnect and discard the current client, if any
    pub(crate) async fn drop_client(&mut self) {
        if let Some(mut client) = self.client.take() {
            if client.is_connected() {
                if let Err(err) = client.disconnect().await {
                    warn!(%err, "disconnect failed");
                }
            }
            self.set_state(SessionState::Disconnected);
        }
    }

    async fn teardown(&mut self) {
        self.input.disarm();
        self.drop_client().await;
    }
}
