//! Authentication Flow
//!
//! Startup session probe, interactive login (code plus optional second
//! factor), and logout. Each step emits a status event before it executes;
//! every failure path leaves the session disconnected and maps to exactly one
//! emitted event.

use tracing::warn;

use crate::client::{ClientConfig, SignInOutcome};
use crate::models::command::LoginRequest;
use crate::models::credentials::Credentials;
use crate::models::event::InputRequest;
use crate::models::session::SessionState;
use crate::services::worker::Worker;
use crate::utils::error::AppResult;

/// Terminal state of a login flow that did not error out
pub(crate) enum LoginOutcome {
    LoggedIn,
    Cancelled,
}

impl Worker {
    /// Probe the persisted session once at startup and steer the control
    /// context to the right page.
    pub(crate) async fn check_startup_session(&mut self) {
        let credentials = match self.store.load() {
            Ok(credentials) => credentials,
            Err(err) => {
                warn!(%err, "credential file unreadable");
                None
            }
        };

        let credentials = match credentials {
            Some(credentials) if self.artifact.exists() => credentials,
            _ => {
                self.events
                    .navigate_to_login("No active session. Please log in.");
                return;
            }
        };

        self.set_state(SessionState::Connecting);
        match self.probe_session(&credentials).await {
            Ok(true) => {
                self.set_state(SessionState::Authorized);
                self.events.navigate_to_exporter();
            }
            Ok(false) => {
                self.set_state(SessionState::Unauthorized);
                self.drop_client().await;
                self.events
                    .navigate_to_login("Session invalid. Please log in again.");
            }
            Err(err) => {
                warn!(%err, "session probe failed");
                self.drop_client().await;
                self.events
                    .navigate_to_login("Session invalid. Please log in again.");
            }
        }
    }

    async fn probe_session(&mut self, credentials: &Credentials) -> AppResult<bool> {
        let mut client = self.factory.open(&ClientConfig {
            api_id: credentials.api_id,
            api_hash: credentials.api_hash.clone(),
            session_path: self.artifact.path().to_path_buf(),
        })?;
        client.connect().await?;
        self.client = Some(client);
        Ok(self.client_mut()?.is_authorized().await?)
    }

    pub(crate) async fn handle_login(&mut self, request: LoginRequest) {
        self.events.status("Logging in...");
        match self.run_login(&request).await {
            Ok(LoginOutcome::LoggedIn) => {
                self.set_state(SessionState::Authorized);
                match request.credentials() {
                    Ok(credentials) => {
                        if let Err(err) = self.store.save(&credentials) {
                            warn!(%err, "failed to persist credentials");
                        }
                    }
                    Err(err) => warn!(%err, "failed to persist credentials"),
                }
                self.events.completed("Login successful!");
                self.events.navigate_to_exporter();
            }
            Ok(LoginOutcome::Cancelled) => {
                self.drop_client().await;
                self.events.failed("Login cancelled.");
            }
            Err(err) => {
                self.drop_client().await;
                self.events.failed(format!("Error: {err}"));
            }
        }
    }

    async fn run_login(&mut self, request: &LoginRequest) -> AppResult<LoginOutcome> {
        self.drop_client().await;
        self.set_state(SessionState::Connecting);

        let mut client = self.factory.open(&ClientConfig {
            api_id: request.parsed_api_id()?,
            api_hash: request.api_hash.clone(),
            session_path: self.artifact.path().to_path_buf(),
        })?;
        client.connect().await?;
        self.client = Some(client);

        self.events.status("Sending login code...");
        let token = self
            .client_mut()?
            .request_login_code(&request.phone)
            .await?;

        let code = self.wait_for_input(InputRequest::login_code()).await;
        let code = match code.filter(|value| !value.is_empty()) {
            Some(code) => code,
            None => return Ok(LoginOutcome::Cancelled),
        };

        let outcome = self
            .client_mut()?
            .sign_in_with_code(&request.phone, &code, &token)
            .await?;

        if outcome == SignInOutcome::SecondFactorRequired {
            self.events.status("Password required.");
            let password = self.wait_for_input(InputRequest::password()).await;
            let password = match password.filter(|value| !value.is_empty()) {
                Some(password) => password,
                None => return Ok(LoginOutcome::Cancelled),
            };
            self.client_mut()?.sign_in_with_password(&password).await?;
        }

        Ok(LoginOutcome::LoggedIn)
    }

    /// Logout is idempotent: missing files and an absent client are fine.
    pub(crate) async fn handle_logout(&mut self) {
        self.drop_client().await;
        if let Err(err) = self.store.delete() {
            warn!(%err, "could not remove credential file");
        }
        if let Err(err) = self.artifact.delete() {
            warn!(%err, "could not remove session artifact");
        }
        self.set_state(SessionState::Absent);
        self.events.navigate_to_login("Successfully logged out.");
    }
}
