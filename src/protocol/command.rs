//! Command definitions
//!
//! A command is a short ASCII instruction ending with `#`, e.g. `*pow=on#`.

use std::fmt;
use std::str::FromStr;

use crate::error::{PanelError, Result};

/// Terminator every command must end with
pub const TERMINATOR: char = '#';

/// Literal token users type in place of a carriage return in raw commands
pub const CR_TOKEN: &str = "<CR>";

/// A normalized projector command
///
/// Always non-empty, pure ASCII, and terminated by exactly the `#` the
/// caller wrote or one appended during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(pub(super) String);

impl Command {
    /// Build a command, appending the terminator if it is missing
    pub fn new(input: impl Into<String>) -> Result<Self> {
        let mut text = input.into();

        if text.trim().is_empty() {
            return Err(PanelError::MissingCommand);
        }

        if let Some(bad) = text.chars().find(|c| !c.is_ascii()) {
            return Err(PanelError::InvalidCommand(format!(
                "non-ASCII character {:?} in {:?}",
                bad, text
            )));
        }

        if !text.ends_with(TERMINATOR) {
            text.push(TERMINATOR);
        }

        Ok(Self(text))
    }

    /// Build a command from text typed into the raw command box
    ///
    /// Copy-pasted manual entries often carry literal `<CR>` markers; the
    /// wire framing is controlled by wrap mode instead, so they are dropped.
    pub fn from_user_input(input: &str) -> Result<Self> {
        if input.contains(CR_TOKEN) {
            Self::new(input.replace(CR_TOKEN, ""))
        } else {
            Self::new(input)
        }
    }

    /// The command text including its terminator
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the command in bytes, terminator included
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Command {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
