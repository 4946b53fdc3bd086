//! Layer the configuration sources over the defaults, then post-process.
//!
//! Precedence, lowest first: defaults, settings file, environment variables,
//! command line. Each layer only touches entries it provides a value for and
//! records itself as the entry's source.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::core::configuration::Configuration;
use crate::core::convert::oxford_comma;
use crate::core::messages::{Diagnostics, LogLevel};
use crate::core::value::{SourceKind, Value};
use crate::io::settings::SettingsFile;
use crate::post_process::PostProcessor;

/// Raw inputs collected by the binary.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub settings: Option<SettingsFile>,
    /// Process environment as `(name, value)` pairs.
    pub environment: Vec<(String, String)>,
    /// Values given on the command line, keyed by entry name.
    pub cli: Vec<(String, Value)>,
}

/// Apply every source, post-process all entries, then check choices.
#[instrument(skip_all)]
pub fn configure(
    config: &mut Configuration,
    sources: &Sources,
    post_processor: &PostProcessor<'_>,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    if let Some(settings) = &sources.settings {
        diagnostics.extend(apply_settings(config, settings));
    }
    diagnostics.extend(apply_environment(config, &sources.environment));
    diagnostics.extend(apply_cli(config, &sources.cli));
    diagnostics.extend(post_processor.run(config));
    diagnostics.extend(check_choices(config));
    debug!(fatal = diagnostics.is_fatal(), "configuration complete");
    diagnostics
}

pub fn apply_settings(config: &mut Configuration, settings: &SettingsFile) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    config.internals.settings_file_path = Some(settings.path.clone());
    diagnostics.log(
        LogLevel::Info,
        format!("Using settings file at {}", settings.path.display()),
    );
    for (name, value) in &settings.values {
        match config.entry_mut(name) {
            Some(entry) => {
                entry.set(value.clone(), SourceKind::ConfigFile);
                diagnostics.debug(format!(
                    "{name} set to '{value}' from {}",
                    settings.path.display()
                ));
            }
            None => diagnostics.exit(format!(
                "Unrecognized setting '{name}' in {}",
                settings.path.display()
            )),
        }
    }
    diagnostics
}

/// Read `ANSIBLE_NAVIGATOR_<NAME>` (or the entry's override) for every entry.
///
/// List entries take comma-separated input.
pub fn apply_environment(config: &mut Configuration, environment: &[(String, String)]) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let lookup: BTreeMap<&str, &str> = environment
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    let prefix = config.environment_prefix();
    for entry in &mut config.entries {
        let variable = entry.environment_variable(&prefix);
        let Some(raw) = lookup.get(variable.as_str()) else {
            continue;
        };
        let value = if entry.multiple {
            Value::strings(
                raw.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty()),
            )
        } else {
            Value::string(*raw)
        };
        diagnostics.debug(format!("{} set to '{value}' from {variable}", entry.name));
        entry.set(value, SourceKind::EnvironmentVariable);
    }
    diagnostics
}

pub fn apply_cli(config: &mut Configuration, cli: &[(String, Value)]) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for (name, value) in cli {
        match config.entry_mut(name) {
            Some(entry) => {
                entry.set(value.clone(), SourceKind::UserCli);
                diagnostics.debug(format!("{name} set to '{value}' from the command line"));
            }
            None => diagnostics.exit(format!("Unrecognized command line entry '{name}'")),
        }
    }
    diagnostics
}

/// Reject string values outside an entry's declared choices.
///
/// Only entries exposed on the command line are checked, so the hint can name
/// the flag to retry with.
pub fn check_choices(config: &Configuration) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for entry in &config.entries {
        if entry.choices.is_empty() {
            continue;
        }
        let Some(short) = entry.short_flag() else {
            continue;
        };
        let Some(current) = entry.value.current.as_str() else {
            continue;
        };
        if entry.choices.iter().any(|choice| choice == current) {
            continue;
        }
        diagnostics.exit(format!(
            "{} must be one of {}",
            entry.name,
            oxford_comma(&entry.choices, "or")
        ));
        let options: Vec<String> = entry
            .choices
            .iter()
            .map(|choice| format!("{short} {choice}"))
            .collect();
        diagnostics.hint(format!("Try again with {}", oxford_comma(&options, "or")));
    }
    diagnostics
}
