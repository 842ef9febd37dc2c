//! Transport Module
//!
//! One command/response exchange with the projector per call.
//!
//! ## Exchange Lifecycle
//! ```text
//! IDLE → CONNECTING → CONNECTED → SENT → READING → CLOSED
//!   │         │           │         │        │
//!   └─────────┴───────────┴─────────┴────────┴──▶ CLOSED (on failure)
//! ```
//!
//! - No retries: a failed connect is reported, never repeated
//! - The reply ends at the first idle gap, when the peer closes, or at the
//!   hard deadline (`timeout + safety_margin`), whichever comes first
//! - The socket is dropped on every exit path

use std::time::Duration;

use crate::error::Result;
use crate::protocol::Command;

mod target;
mod tcp;

pub use target::{ExchangeOptions, Target};
pub use tcp::TcpTransport;

/// Why the read loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No data arrived within the read timeout
    Idle,
    /// The projector closed its side of the connection
    PeerClosed,
    /// The hard deadline passed while data was still arriving
    Deadline,
}

/// A successful exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply decoded as ASCII; empty when the projector said nothing
    pub text: String,

    /// Raw bytes received before decoding
    pub bytes_read: usize,

    /// Wall-clock time from connect to close
    pub elapsed: Duration,

    pub stop: StopReason,
}

impl Reply {
    /// True when the projector sent nothing back
    pub fn is_empty(&self) -> bool {
        self.bytes_read == 0
    }
}

/// Performs a single command exchange with a device
///
/// Implementations must not retry and must release the connection before
/// returning.
pub trait Transport: Send + Sync {
    fn exchange(&self, target: &Target, command: &Command, options: &ExchangeOptions)
        -> Result<Reply>;
}
