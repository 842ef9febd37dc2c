//! Exchange targets and timing options

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use crate::error::{PanelError, Result};

/// Where to send a command and how to frame it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Hostname or IP literal
    pub host: String,

    pub port: u16,

    /// Surround the command with carriage returns on the wire
    pub wrap_cr: bool,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            wrap_cr: false,
        }
    }

    /// Set the CR wrap mode
    pub fn wrap_cr(mut self, wrap: bool) -> Self {
        self.wrap_cr = wrap;
        self
    }

    /// Reject targets no connection could ever be made to
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(PanelError::InvalidTarget("empty host".to_string()));
        }
        if self.port == 0 {
            return Err(PanelError::InvalidTarget("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(_)) => write!(f, "[{}]:{}", self.host, self.port),
            _ => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

/// Timing of a single exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeOptions {
    /// Connect timeout, and the idle gap that ends the reply
    pub timeout: Duration,

    /// Added to `timeout` to form the hard ceiling on the read loop
    pub safety_margin: Duration,
}

impl ExchangeOptions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Set the safety margin
    pub fn safety_margin(mut self, margin: Duration) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Longest the read loop may run
    pub fn ceiling(&self) -> Duration {
        self.timeout.saturating_add(self.safety_margin)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(PanelError::Config("exchange timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(2),
            safety_margin: Duration::from_secs(1),
        }
    }
}
