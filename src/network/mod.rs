//! Network Module
//!
//! HTTP surface of the control panel.
//!
//! ## Architecture
//! - Single acceptor thread polling the listener
//! - Worker thread pool fed through a bounded channel
//! - Each worker runs one projector exchange at a time via the Controller
//!
//! ## Routes
//! - `GET  /`                 control page
//! - `GET  /static/js/app.js` page script
//! - `POST /api/preset`       send a command table entry
//! - `POST /api/raw`          send a free-form command
//! - `GET  /api/ping`         liveness
//! - `GET  /favicon.ico`      204
//! - `GET  /manual.pdf`       RS232 control guide, if configured

pub mod api;
mod assets;
mod handler;
mod server;

pub use handler::{ApiResponse, Handler};
pub use server::{Server, ShutdownHandle};
pub use tiny_http::Method;
