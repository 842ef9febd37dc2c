//! Error types for the projector panel
//!
//! Provides a unified error type for all operations.

use std::fmt;

use thiserror::Error;

/// Result type alias using PanelError
pub type Result<T> = std::result::Result<T, PanelError>;

/// Phase of a single command exchange in which a transport failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangePhase {
    /// Resolving the host or establishing the TCP connection
    Connecting,
    /// Writing the command frame
    Sending,
    /// Draining the reply
    Reading,
}

impl fmt::Display for ExchangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExchangePhase::Connecting => "connect",
            ExchangePhase::Sending => "send",
            ExchangePhase::Reading => "receive",
        };
        f.write_str(name)
    }
}

/// Unified error type for projector panel operations
#[derive(Debug, Error)]
pub enum PanelError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Client Errors (rejected before any network I/O)
    // -------------------------------------------------------------------------
    #[error("unknown preset key: {0}")]
    UnknownAction(String),

    #[error("no command provided")]
    MissingCommand,

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("could not resolve {host}:{port}: {reason}")]
    Resolve {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("{phase} failed for {addr}: {source}")]
    Transport {
        phase: ExchangePhase,
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("invalid JSON body: {0}")]
    BadRequest(String),

    // -------------------------------------------------------------------------
    // Server / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("HTTP server error: {0}")]
    Http(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PanelError {
    /// True for errors caused by the caller's input rather than the network
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PanelError::UnknownAction(_)
                | PanelError::MissingCommand
                | PanelError::InvalidCommand(_)
                | PanelError::InvalidTarget(_)
                | PanelError::BadRequest(_)
        )
    }

    /// True for failures while talking to the projector
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            PanelError::Resolve { .. } | PanelError::Transport { .. }
        )
    }

    /// Render in the `ERROR: ...` form older panel clients expect in the
    /// `response` field.
    pub fn legacy_message(&self) -> String {
        format!("ERROR: {}", self)
    }
}
