//! Rules that consult the active subcommand, sibling entries, or the host.

use std::path::Path;

use crate::core::configuration::Configuration;
use crate::core::convert::{flatten_list, oxford_comma};
use crate::core::definitions::{INTERACTIVE, STDOUT};
use crate::core::entry::Entry;
use crate::core::inventory::InventorySource;
use crate::core::messages::Diagnostics;
use crate::core::value::Value;
use crate::post_process::PostProcessor;
use crate::post_process::simple::{coerce_bool, normalize_path};

impl PostProcessor<'_> {
    pub(super) fn inventory(&self, entry: &mut Entry, config: &Configuration) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if !entry.value.current.is_set() {
            if config.app() == "inventory" {
                diagnostics.exit("An inventory is required when using the inventory subcommand");
                if let Some(short) = entry.short_flag() {
                    diagnostics.hint(format!("Try again with '{short} <path to inventory>'"));
                }
            }
            return diagnostics;
        }
        let sources: Vec<String> = flatten_list(&entry.value.current)
            .iter()
            .map(|raw| InventorySource::classify(raw).into_string())
            .collect();
        entry.value.current = Value::strings(sources);
        diagnostics
    }

    pub(super) fn playbook(&self, entry: &mut Entry, config: &Configuration) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if config.app() == "run" && !entry.value.current.is_set() {
            diagnostics.exit("A playbook is required when using the run subcommand");
            diagnostics.hint("Try again with 'run <playbook name>'");
            return diagnostics;
        }
        normalize_path(entry);
        diagnostics
    }

    pub(super) fn playbook_artifact_replay(
        &self,
        entry: &mut Entry,
        config: &Configuration,
    ) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if config.app() != "replay" {
            normalize_path(entry);
            return diagnostics;
        }
        if !entry.value.current.is_set() {
            diagnostics.exit("An playbook artifact file is required when using the replay subcommand");
            diagnostics.hint("Try again with 'replay <path to playbook artifact>'");
            return diagnostics;
        }
        normalize_path(entry);
        let exists = entry
            .value
            .current
            .as_str()
            .is_some_and(|path| Path::new(path).is_file());
        if !exists {
            diagnostics.exit(format!(
                "The specified playbook artifact could not be found: {}",
                entry.value.current
            ));
            diagnostics.hint("Try again with 'replay <valid path to playbook artifact>'");
        }
        diagnostics
    }

    /// `doc` needs a plugin name unless it only prints ansible-doc help.
    pub(super) fn plugin_name(&self, entry: &mut Entry, config: &Configuration) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        if config.app() == "doc" && !entry.value.current.is_set() && !config.is_true("help_doc") {
            diagnostics.exit("An plugin name is required when using the doc subcommand");
            diagnostics.hint("Try again with 'doc <plugin_name>'");
        }
        diagnostics
    }

    pub(super) fn help_config(&self, entry: &mut Entry, config: &Configuration) -> Diagnostics {
        help_flag(entry, config, "config")
    }

    pub(super) fn help_doc(&self, entry: &mut Entry, config: &Configuration) -> Diagnostics {
        help_flag(entry, config, "doc")
    }

    /// Check the container engine when an execution environment is in use,
    /// otherwise check that ansible runs on the host.
    pub(super) fn execution_environment(
        &self,
        entry: &mut Entry,
        config: &Configuration,
    ) -> Diagnostics {
        let mut diagnostics = coerce_bool(entry);
        let ee_details = config.app() == "ee-details";
        if diagnostics.is_fatal() && !ee_details {
            return diagnostics;
        }
        let enabled = entry.value.current == Value::Bool(true);
        if !enabled && !ee_details {
            diagnostics.extend(self.host.ansible_sanity_check());
            return diagnostics;
        }

        let engine = config.container_engine();
        if let Some(path) = self.host.find_executable(engine) {
            diagnostics.debug(format!(
                "Container engine '{engine}' found at {}",
                path.display()
            ));
            return diagnostics;
        }

        let engine_entry = config.entry("container_engine");
        let source = engine_entry.map(|ce| ce.value.source).unwrap_or_default();
        diagnostics.exit(format!(
            "The specified container engine could not be found: '{engine}', set by '{source}'"
        ));
        if let Some(ce) = engine_entry.filter(|ce| ce.choices.iter().any(|choice| choice == engine)) {
            let ce_flag = preferred_flag(ce);
            let alternatives: Vec<String> = ce
                .choices
                .iter()
                .filter(|choice| *choice != engine)
                .map(|choice| format!("{ce_flag} {choice}"))
                .collect();
            diagnostics.hint(format!(
                "Try installing '{engine}', try again with {} or even '{} false' to disable the use of an execution environment",
                oxford_comma(&alternatives, "or"),
                preferred_flag(entry)
            ));
        }
        diagnostics
    }
}

/// Short flag when one exists, otherwise the long one.
fn preferred_flag(entry: &Entry) -> String {
    entry
        .short_flag()
        .map_or_else(|| entry.long_flag(), str::to_string)
}

/// Help flags print the underlying tool's help, which only works in stdout mode.
fn help_flag(entry: &mut Entry, config: &Configuration, subcommand: &str) -> Diagnostics {
    let mut diagnostics = coerce_bool(entry);
    if entry.value.current != Value::Bool(true)
        || config.app() != subcommand
        || config.mode() != INTERACTIVE
    {
        return diagnostics;
    }
    let flags = match entry.short_flag() {
        Some(short) => format!("{short} or {}", entry.long_flag()),
        None => entry.long_flag(),
    };
    diagnostics.exit(format!(
        "{flags} is valid only when 'mode' argument is set to '{STDOUT}'"
    ));
    if let Some(mode_short) = config.entry("mode").and_then(Entry::short_flag) {
        diagnostics.hint(format!("Try again with '{mode_short} {STDOUT}'"));
    }
    diagnostics
}
