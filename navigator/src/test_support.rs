//! Test-only fakes and configuration builders.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::actions::{Action, ActionPackage, ActionRegistry};
use crate::core::configuration::Configuration;
use crate::core::definitions::navigator_configuration;
use crate::core::messages::Diagnostics;
use crate::core::value::{SourceKind, Value};
use crate::io::host::Host;

/// A host with a fixed set of executables and a canned ansible check result.
#[derive(Debug, Default)]
pub struct FakeHost {
    executables: BTreeMap<String, PathBuf>,
    sanity: Diagnostics,
    sanity_calls: Cell<usize>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_executable(mut self, name: &str) -> Self {
        self.executables
            .insert(name.to_string(), PathBuf::from("/usr/bin").join(name));
        self
    }

    pub fn with_sanity(mut self, diagnostics: Diagnostics) -> Self {
        self.sanity = diagnostics;
        self
    }

    /// How many times the ansible check ran.
    pub fn sanity_calls(&self) -> usize {
        self.sanity_calls.get()
    }
}

impl Host for FakeHost {
    fn find_executable(&self, program: &str) -> Option<PathBuf> {
        self.executables.get(program).cloned()
    }

    fn ansible_sanity_check(&self) -> Diagnostics {
        self.sanity_calls.set(self.sanity_calls.get() + 1);
        self.sanity.clone()
    }
}

/// A handler with fixed mode support.
#[derive(Debug, Clone)]
pub struct StaticAction {
    name: String,
    stdout: bool,
    interactive: bool,
}

impl StaticAction {
    pub fn new(name: &str, stdout: bool, interactive: bool) -> Self {
        Self {
            name: name.to_string(),
            stdout,
            interactive,
        }
    }
}

impl Action for StaticAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_stdout(&self) -> bool {
        self.stdout
    }

    fn supports_interactive(&self) -> bool {
        self.interactive
    }
}

/// A package serving a fixed list of handlers.
#[derive(Debug, Clone)]
pub struct StaticPackage {
    actions: Vec<StaticAction>,
}

impl ActionPackage for StaticPackage {
    fn get(&self, name: &str) -> Result<&dyn Action> {
        self.actions
            .iter()
            .find(|action| action.name == name)
            .map(|action| action as &dyn Action)
            .ok_or_else(|| anyhow!("static package has no action '{name}'"))
    }
}

/// Register a [`StaticPackage`] under `identifier`.
pub fn register_static(registry: &mut ActionRegistry, identifier: &str, actions: Vec<StaticAction>) {
    registry.register(identifier, move || {
        Ok(Box::new(StaticPackage {
            actions: actions.clone(),
        }))
    });
}

/// Default navigator configuration with `app` and `mode` set from the command line.
pub fn configuration(app: &str, mode: &str) -> Configuration {
    let mut config = navigator_configuration();
    set(&mut config, "app", Value::from(app), SourceKind::UserCli);
    set(&mut config, "mode", Value::from(mode), SourceKind::UserCli);
    config
}

/// Set an entry's current value and source.
///
/// Panics on unknown entry names.
pub fn set(config: &mut Configuration, name: &str, value: Value, source: SourceKind) {
    match config.entry_mut(name) {
        Some(entry) => entry.set(value, source),
        None => panic!("unknown entry {name}"),
    }
}

/// A writable log file location inside a fresh temporary directory.
pub fn temp_log_file() -> Result<(tempfile::TempDir, PathBuf)> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("ansible-navigator.log");
    Ok((temp, path))
}
