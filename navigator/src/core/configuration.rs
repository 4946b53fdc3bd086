//! The application configuration: ordered entries plus internals.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::convert::str2bool;
use crate::core::entry::Entry;
use crate::core::value::{SourceKind, Value};

/// A subcommand the application exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcommand {
    pub name: String,
    pub description: String,
}

impl Subcommand {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Settings that are not user-facing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Internals {
    /// Action package identifiers, highest priority first.
    pub action_packages: Vec<String>,
    /// Settings file the current values were read from, if any.
    pub settings_file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub application_name: String,
    pub entries: Vec<Entry>,
    pub subcommands: Vec<Subcommand>,
    pub internals: Internals,
}

/// One line of the resolved configuration report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry<'a> {
    pub name: &'a str,
    pub value: &'a Value,
    pub source: SourceKind,
}

impl Configuration {
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.name == name)
    }

    pub fn current(&self, name: &str) -> &Value {
        self.entry(name)
            .map(|entry| &entry.value.current)
            .unwrap_or(&Value::NotSet)
    }

    /// Current value of a string entry, or `""` when unset or not a string.
    pub fn current_str(&self, name: &str) -> &str {
        self.current(name).as_str().unwrap_or("")
    }

    /// True only when the entry holds `true` or a string that reads as true.
    ///
    /// Entries earlier in the sweep have been coerced already; later ones may
    /// still hold raw strings.
    pub fn is_true(&self, name: &str) -> bool {
        matches!(str2bool(self.current(name)), Ok(true))
    }

    /// Active subcommand.
    pub fn app(&self) -> &str {
        self.current_str("app")
    }

    /// Requested user-interface mode.
    pub fn mode(&self) -> &str {
        self.current_str("mode")
    }

    pub fn container_engine(&self) -> &str {
        self.current_str("container_engine")
    }

    pub fn subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.iter().find(|sub| sub.name == name)
    }

    /// Prefix for entry environment variables, e.g. `ANSIBLE_NAVIGATOR`.
    pub fn environment_prefix(&self) -> String {
        self.application_name.replace('-', "_").to_uppercase()
    }

    pub fn resolved(&self) -> Vec<ResolvedEntry<'_>> {
        self.entries
            .iter()
            .map(|entry| ResolvedEntry {
                name: &entry.name,
                value: &entry.value.current,
                source: entry.value.source,
            })
            .collect()
    }
}
