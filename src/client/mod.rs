//! Remote Session Client Boundary
//!
//! Trait seam for the messaging-platform client. The worker drives the
//! session exclusively through these traits; the concrete MTProto backend is
//! supplied by the embedding application via [`SessionClientFactory`].

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by the session client backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Could not establish or re-establish the network connection
    #[error("connection failed: {0}")]
    Connect(String),

    /// The session exists but is not authorized for the account
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The platform rejected a code or password sign-in attempt
    #[error("sign-in failed: {0}")]
    SignIn(String),

    /// The target identifier did not resolve to a conversation
    #[error("could not find '{0}'")]
    PeerNotFound(String),

    /// Any other backend failure
    #[error("{0}")]
    Other(String),
}

/// Connection parameters for opening a session client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Application API id issued by the platform
    pub api_id: i64,
    /// Application API hash issued by the platform
    pub api_hash: String,
    /// Location of the opaque session artifact
    pub session_path: PathBuf,
}

/// Opaque handle returned by a login-code request, passed back verbatim on
/// code sign-in
#[derive(Debug, Clone)]
pub struct CodeToken(pub String);

/// Result of a code sign-in attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The account is fully signed in
    Authorized,
    /// The account has two-step verification enabled; a password sign-in
    /// must follow
    SecondFactorRequired,
}

/// A resolved conversation handle
#[derive(Debug, Clone)]
pub struct Peer {
    /// Display name of the conversation partner, when the platform knows one
    pub display_name: Option<String>,
}

/// Media payload of a message, resolved once at ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Voice,
    Sticker { emoji: Option<String> },
    Document { file_name: Option<String> },
}

/// One message as delivered by the platform (most-recent-first order)
#[derive(Debug, Clone)]
pub struct HistoryMessage {
    /// Timestamp of the message
    pub date: DateTime<Utc>,
    /// Whether the message was authored by the logged-in account
    pub outgoing: bool,
    /// Raw text content; empty when the message has no text
    pub text: String,
    /// At most one media payload
    pub media: Option<MediaKind>,
}

/// Paginated message history stream, newest first
#[async_trait]
pub trait MessageHistory: Send {
    /// Fetch the next message, or `None` when the history is exhausted
    async fn next(&mut self) -> Result<Option<HistoryMessage>, ClientError>;
}

/// An authenticated (or authenticatable) connection to the messaging platform
#[async_trait]
pub trait SessionClient: Send + Sync {
    async fn connect(&mut self) -> Result<(), ClientError>;

    async fn disconnect(&mut self) -> Result<(), ClientError>;

    fn is_connected(&self) -> bool;

    /// Whether the session artifact carries a valid authorization
    async fn is_authorized(&mut self) -> Result<bool, ClientError>;

    /// Ask the platform to deliver a login code to the account
    async fn request_login_code(&mut self, phone: &str) -> Result<CodeToken, ClientError>;

    async fn sign_in_with_code(
        &mut self,
        phone: &str,
        code: &str,
        token: &CodeToken,
    ) -> Result<SignInOutcome, ClientError>;

    /// Second-factor sign-in for accounts with two-step verification
    async fn sign_in_with_password(&mut self, password: &str) -> Result<(), ClientError>;

    /// Resolve a username/phone/handle to a conversation
    async fn resolve_peer(&mut self, identifier: &str) -> Result<Peer, ClientError>;

    /// Open the conversation's full history, newest first
    async fn open_history(&mut self, peer: &Peer)
        -> Result<Box<dyn MessageHistory>, ClientError>;
}

/// Creates session clients on demand; one client is live at a time
pub trait SessionClientFactory: Send + Sync {
    fn open(&self, config: &ClientConfig) -> Result<Box<dyn SessionClient>, ClientError>;
}
