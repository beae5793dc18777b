//! Unified error types for fetchgate.
//!
//! Every variant is terminal for the request it belongs to; nothing here is retried.

/// Unified error types for the fetchgate services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No target URL was supplied.
    #[error("MISSING_INPUT: {0}")]
    MissingInput(String),

    /// The target URL matched the denylist.
    #[error("BLOCKED_SCHEME: {0}")]
    BlockedScheme(String),

    /// Network failure during the fetch (DNS, connect, timeout, body read).
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// The external fetch command failed to spawn, timed out, or exited non-zero.
    #[error("EXTERNAL_PROCESS: {0}")]
    ExternalProcess(String),

    /// The HTTP client could not be constructed.
    #[error("CLIENT_BUILD: {0}")]
    ClientBuild(String),
}

impl Error {
    /// The message without its code prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::MissingInput(msg)
            | Error::BlockedScheme(msg)
            | Error::Transport(msg)
            | Error::ExternalProcess(msg)
            | Error::ClientBuild(msg) => msg,
        }
    }
}
