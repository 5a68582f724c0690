//! Errors produced by API client operations.

use crate::session::StoreError;

/// One variant per failing operation family, so callers can tell a
/// rejected login from a failed vote without inspecting messages.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The client could not be constructed from its configuration.
    #[error("client config invalid: {0}")]
    Config(String),

    /// Transport failure; no HTTP response was received.
    #[error("network error: {0}")]
    Network(String),

    /// Login or registration was rejected.
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// A read endpoint returned a non-success status.
    #[error("failed to fetch {what}: {message}")]
    Fetch {
        what: &'static str,
        status: u16,
        message: String,
    },

    /// Bag creation was rejected.
    #[error("failed to create bag: {message}")]
    Create { status: u16, message: String },

    /// Bag update was rejected.
    #[error("failed to update bag: {message}")]
    Update { status: u16, message: String },

    /// Vote was rejected.
    #[error("failed to vote: {message}")]
    Vote { status: u16, message: String },

    /// A success response carried a body that is not JSON.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The session could not be persisted.
    #[error("session store failed: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// The bare message, without the operation prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Auth { message, .. }
            | Self::Fetch { message, .. }
            | Self::Create { message, .. }
            | Self::Update { message, .. }
            | Self::Vote { message, .. } => message.clone(),
            Self::Config(message) | Self::Network(message) | Self::Decode(message) => message.clone(),
            Self::Store(e) => e.to_string(),
        }
    }

    /// HTTP status, for errors that came with a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::Fetch { status, .. }
            | Self::Create { status, .. }
            | Self::Update { status, .. }
            | Self::Vote { status, .. } => Some(*status),
            Self::Config(_) | Self::Network(_) | Self::Decode(_) | Self::Store(_) => None,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "E_CONFIG",
            Self::Network(_) => "E_NETWORK",
            Self::Auth { .. } => "E_AUTH",
            Self::Fetch { .. } => "E_FETCH",
            Self::Create { .. } => "E_CREATE",
            Self::Update { .. } => "E_UPDATE",
            Self::Vote { .. } => "E_VOTE",
            Self::Decode(_) => "E_DECODE",
            Self::Store(_) => "E_STORE",
        }
    }
}
