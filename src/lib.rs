//! # Projector Panel
//!
//! A local web control panel for projectors with an RS232-over-Ethernet
//! control port:
//! - Static table of friendly actions (`pow_on`, `sour_hdmi`, ...)
//! - One TCP connection per command, reply read until the projector goes quiet
//! - Browser UI and JSON API served over HTTP
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │              (acceptor + worker thread pool)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Controller                               │
//! │        (resolve key / raw command, default target)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Command   │          │  Transport  │
//!   │    Table    │          │ (TCP, 1:1)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  Projector  │
//!                           │ (RS232/LAN) │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod transport;
pub mod network;
pub mod controller;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PanelError, Result};
pub use config::Config;
pub use controller::Controller;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the projector panel
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
