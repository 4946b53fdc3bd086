//! Per-entry post-processing of a populated configuration.
//!
//! Each entry that needs normalization or validation has one rule, looked up by
//! entry name. A pass visits every entry once, in configuration order, and
//! collects the diagnostics of every rule; nothing stops the sweep early, so
//! the caller sees every problem from a single run.
//!
//! - [`simple`]: value coercions that only look at the entry itself.
//! - [`dependent`]: validators that consult sibling entries and the active subcommand.
//! - [`mode`]: matches the requested mode against the subcommand's capabilities.

mod dependent;
mod mode;
mod simple;

use tracing::{debug, instrument};

use crate::actions::ActionRegistry;
use crate::core::configuration::Configuration;
use crate::core::entry::Entry;
use crate::core::messages::Diagnostics;
use crate::io::host::Host;

type Rule<'a> = fn(&PostProcessor<'a>, &mut Entry, &Configuration) -> Diagnostics;

/// Rule lookup plus the collaborators rules may consult.
pub struct PostProcessor<'a> {
    host: &'a dyn Host,
    actions: &'a ActionRegistry,
}

impl<'a> PostProcessor<'a> {
    pub fn new(host: &'a dyn Host, actions: &'a ActionRegistry) -> Self {
        Self { host, actions }
    }

    fn rule(name: &str) -> Option<Rule<'a>> {
        let rule: Rule<'a> = match name {
            "cmdline" => Self::cmdline,
            "collection_doc_cache_path" => Self::collection_doc_cache_path,
            "editor_console" => Self::true_or_false,
            "execution_environment" => Self::execution_environment,
            "help_config" => Self::help_config,
            "help_doc" => Self::help_doc,
            "inventory" => Self::inventory,
            "inventory_column" => Self::flatten,
            "log_append" => Self::true_or_false,
            "log_file" => Self::log_file,
            "mode" => Self::mode,
            "osc4" => Self::true_or_false,
            "pass_environment_variable" => Self::flatten,
            "playbook" => Self::playbook,
            "playbook_artifact_enable" => Self::true_or_false,
            "playbook_artifact_replay" => Self::playbook_artifact_replay,
            "plugin_name" => Self::plugin_name,
            "set_environment_variable" => Self::set_environment_variable,
            _ => return None,
        };
        Some(rule)
    }

    pub fn has_rule(name: &str) -> bool {
        Self::rule(name).is_some()
    }

    /// Run the rule registered for `name` and trace whether it changed the value.
    ///
    /// Entries without a rule, and names not present in `config`, produce no
    /// diagnostics.
    pub fn post_process_entry(&self, config: &mut Configuration, name: &str) -> Diagnostics {
        let Some(rule) = Self::rule(name) else {
            return Diagnostics::new();
        };
        let Some(index) = config.entries.iter().position(|entry| entry.name == name) else {
            return Diagnostics::new();
        };

        // Detached while the rule runs so siblings stay readable through `config`.
        let mut entry = config.entries[index].clone();
        let before = entry.value.current.to_string();
        let mut diagnostics = rule(self, &mut entry, config);
        let after = entry.value.current.to_string();
        config.entries[index] = entry;

        let changed = before != after;
        diagnostics.debug(format!(
            "Completed post processing for {name}. (changed={changed})"
        ));
        if changed {
            diagnostics.debug(format!(" before: '{before}'"));
            diagnostics.debug(format!(" after: '{after}'"));
        }
        diagnostics
    }

    /// Post-process every entry once, in configuration order.
    #[instrument(skip_all, fields(app = %config.app()))]
    pub fn run(&self, config: &mut Configuration) -> Diagnostics {
        let names: Vec<String> = config
            .entries
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        let mut diagnostics = Diagnostics::new();
        for name in &names {
            diagnostics.extend(self.post_process_entry(config, name));
        }
        debug!(
            exit_messages = diagnostics.exit_messages.len(),
            "post processing complete"
        );
        diagnostics
    }
}
