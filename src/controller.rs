//! Controller Module
//!
//! Turns a panel request into exactly one projector exchange.
//!
//! ## Responsibilities
//! - Resolve action keys against the command table
//! - Normalize raw commands typed by the user
//! - Fill in the target from configuration when the request leaves it out
//! - Hand the command to the transport and report the outcome
//!
//! Client errors (unknown key, missing or invalid command, bad target) are
//! returned as `Err` before the transport is touched. Transport failures are
//! carried inside the returned [`Exchange`] so the caller still knows what
//! was sent.

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{Command, CommandTable};
use crate::transport::{ExchangeOptions, Reply, Target, TcpTransport, Transport};

/// What the caller asked to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A key from the command table, e.g. `pow_on`
    Preset(String),

    /// Free-form command text, terminator optional
    Raw(String),
}

/// Per-request overrides of the configured target
///
/// Empty hosts and zero ports count as "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub wrap_cr: Option<bool>,
}

/// Result of dispatching one action
#[derive(Debug)]
pub struct Exchange {
    /// The normalized command that was sent
    pub command: Command,

    /// Where it was sent
    pub target: Target,

    /// The projector's reply, or why the exchange failed
    pub result: Result<Reply>,
}

/// Request router in front of the transport
pub struct Controller<T = TcpTransport> {
    config: Config,
    table: CommandTable,
    transport: T,
}

impl Controller<TcpTransport> {
    /// Controller with the built-in table talking TCP
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, CommandTable::builtin(), TcpTransport::new())
    }
}

impl<T: Transport> Controller<T> {
    pub fn with_transport(config: Config, table: CommandTable, transport: T) -> Self {
        Self {
            config,
            table,
            transport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve an action to the command that would be sent
    pub fn resolve(&self, action: &Action) -> Result<Command> {
        match action {
            Action::Preset(key) => self.table.lookup(key).cloned(),
            Action::Raw(text) => Command::from_user_input(text),
        }
    }

    /// Merge overrides onto the configured default target
    pub fn target(&self, overrides: &TargetOverrides) -> Result<Target> {
        let mut target = self.config.default_target();

        if let Some(host) = overrides.host.as_deref().map(str::trim) {
            if !host.is_empty() {
                target.host = host.to_string();
            }
        }
        if let Some(port) = overrides.port.filter(|p| *p != 0) {
            target.port = port;
        }
        if let Some(wrap) = overrides.wrap_cr {
            target.wrap_cr = wrap;
        }

        target.validate()?;
        Ok(target)
    }

    /// Resolve, target and send one action
    pub fn execute(&self, action: &Action, overrides: &TargetOverrides) -> Result<Exchange> {
        let command = match self.resolve(action) {
            Ok(command) => command,
            Err(e) => {
                tracing::info!("rejected {:?}: {}", action, e);
                return Err(e);
            }
        };
        let target = self.target(overrides)?;

        tracing::info!(
            "sending {} to {} (wrap={})",
            command,
            target,
            target.wrap_cr
        );

        let result = self.send(&target, &command);

        match &result {
            Ok(reply) => tracing::info!(
                "reply from {}: {} bytes in {:?} ({:?})",
                target,
                reply.bytes_read,
                reply.elapsed,
                reply.stop
            ),
            Err(e) => tracing::warn!("exchange with {} failed: {}", target, e),
        }

        Ok(Exchange {
            command,
            target,
            result,
        })
    }

    /// Send an already-built command with the configured timing
    pub fn send(&self, target: &Target, command: &Command) -> Result<Reply> {
        self.transport.exchange(target, command, &self.options())
    }

    fn options(&self) -> ExchangeOptions {
        self.config.exchange_options()
    }
}
