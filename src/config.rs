//! Configuration for the projector panel
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::transport::{ExchangeOptions, Target};

/// Main configuration for a panel instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Projector Configuration
    // -------------------------------------------------------------------------
    /// Projector host used when a request does not name one
    pub projector_host: String,

    /// Projector control port used when a request does not name one
    pub projector_port: u16,

    /// Default for wrapping commands in carriage returns
    pub wrap_cr: bool,

    // -------------------------------------------------------------------------
    // Exchange Configuration
    // -------------------------------------------------------------------------
    /// Connect timeout, and the idle gap that ends a reply
    pub timeout: Duration,

    /// Extra time past `timeout` before the read loop is cut off regardless
    /// of incoming data
    pub safety_margin: Duration,

    // -------------------------------------------------------------------------
    // Web Server Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Number of worker threads serving HTTP requests
    pub workers: usize,

    /// Location of the RS232 control guide served at `/manual.pdf`
    pub manual_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projector_host: "192.168.1.5".to_string(),
            projector_port: 8000,
            wrap_cr: false,
            timeout: Duration::from_secs(2),
            safety_margin: Duration::from_secs(1),
            listen_addr: "0.0.0.0:5000".to_string(),
            workers: 4,
            manual_path: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Target used when the caller supplies nothing
    pub fn default_target(&self) -> Target {
        Target::new(self.projector_host.clone(), self.projector_port).wrap_cr(self.wrap_cr)
    }

    /// Timeouts for one exchange
    pub fn exchange_options(&self) -> ExchangeOptions {
        ExchangeOptions {
            timeout: self.timeout,
            safety_margin: self.safety_margin,
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default projector host
    pub fn projector_host(mut self, host: impl Into<String>) -> Self {
        self.config.projector_host = host.into();
        self
    }

    /// Set the default projector port
    pub fn projector_port(mut self, port: u16) -> Self {
        self.config.projector_port = port;
        self
    }

    /// Set the default CR wrap mode
    pub fn wrap_cr(mut self, wrap: bool) -> Self {
        self.config.wrap_cr = wrap;
        self
    }

    /// Set the exchange timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the exchange timeout (in milliseconds)
    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }

    /// Set the hard read ceiling margin (added to the timeout)
    pub fn safety_margin(mut self, margin: Duration) -> Self {
        self.config.safety_margin = margin;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the number of HTTP worker threads
    pub fn workers(mut self, count: usize) -> Self {
        self.config.workers = count;
        self
    }

    /// Set the path of the manual served at `/manual.pdf`
    pub fn manual_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.manual_path = Some(path.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
