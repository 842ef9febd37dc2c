//! Command table
//!
//! Static mapping from human-friendly action keys to literal commands.

use std::collections::HashMap;

use crate::error::{PanelError, Result};
use super::Command;

/// Built-in action keys for the BenQ MW853UST control profile
const BUILTIN: &[(&str, &str)] = &[
    // Power
    ("pow_on", "*pow=on#"),
    ("pow_off", "*pow=off#"),
    ("pow_status", "*pow=?#"),
    // Sources
    ("sour_rgb", "*sour=RGB#"),
    ("sour_hdmi", "*sour=hdmi#"),
    ("sour_dvid", "*sour=dvid#"),
    ("sour_vid", "*sour=vid#"),
    ("sour_hdbaset", "*sour=hdbaset#"),
    ("sour_dp", "*sour=dp#"),
    // Menu navigation
    ("menu_on", "*menu=on#"),
    ("menu_off", "*menu=off#"),
    ("menu_status", "*menu=?#"),
    ("enter", "*enter#"),
    ("up", "*up#"),
    ("down", "*down#"),
    ("left", "*left#"),
    ("right", "*right#"),
];

/// Read-only action key → command mapping
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: HashMap<String, Command>,
}

impl CommandTable {
    /// The built-in table for the supported projector
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(key, cmd)| ((*key).to_string(), Command(cmd.to_string())))
            .collect();
        Self { entries }
    }

    /// Build a table from custom entries
    ///
    /// Fails on duplicate keys or entries that are not valid commands.
    pub fn from_entries<I, K, C>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<String>,
        C: Into<String>,
    {
        let mut map = HashMap::new();
        for (key, cmd) in entries {
            let key = key.into();
            if key.is_empty() {
                return Err(PanelError::Config("empty action key".to_string()));
            }
            let command = Command::new(cmd)?;
            if map.insert(key.clone(), command).is_some() {
                return Err(PanelError::Config(format!("duplicate action key: {}", key)));
            }
        }
        Ok(Self { entries: map })
    }

    /// Look up the command for an action key
    pub fn lookup(&self, key: &str) -> Result<&Command> {
        self.entries
            .get(key)
            .ok_or_else(|| PanelError::UnknownAction(key.to_string()))
    }

    /// Whether the key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries sorted by key
    pub fn entries(&self) -> Vec<(&str, &Command)> {
        let mut all: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::builtin()
    }
}
