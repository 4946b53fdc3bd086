//! The ansible-navigator entry and subcommand catalog.

use crate::core::configuration::{Configuration, Internals, Subcommand};
use crate::core::convert::abs_user_path;
use crate::core::entry::Entry;
use crate::core::value::Value;

pub const APPLICATION_NAME: &str = "ansible-navigator";

/// Identifier of the action package compiled into this crate.
pub const BUILTIN_ACTION_PACKAGE: &str = "ansible_navigator.actions";

/// User-interface modes a subcommand may run in.
pub const STDOUT: &str = "stdout";
pub const INTERACTIVE: &str = "interactive";

pub const PLUGIN_TYPES: [&str; 13] = [
    "become",
    "cache",
    "callback",
    "cliconf",
    "connection",
    "httpapi",
    "inventory",
    "lookup",
    "module",
    "netconf",
    "shell",
    "strategy",
    "vars",
];

pub fn navigator_subcommands() -> Vec<Subcommand> {
    vec![
        Subcommand::new("collections", "Explore available collections"),
        Subcommand::new("config", "Explore the current ansible configuration"),
        Subcommand::new("doc", "Review documentation for a module or plugin"),
        Subcommand::new("ee-details", "Explore execution environment details"),
        Subcommand::new("images", "Explore execution environment images"),
        Subcommand::new("inventory", "Explore an inventory"),
        Subcommand::new("replay", "Explore a previous run using a playbook artifact"),
        Subcommand::new("run", "Run a playbook"),
        Subcommand::new("welcome", "Start at the welcome page"),
    ]
}

pub fn navigator_entries() -> Vec<Entry> {
    let subcommands: Vec<String> = navigator_subcommands()
        .into_iter()
        .map(|sub| sub.name)
        .collect();
    vec![
        Entry::new("app", "Subcommand to invoke", Value::from("welcome")).with_choices(subcommands),
        Entry::new(
            "cmdline",
            "Extra parameters passed to the corresponding command",
            Value::NotSet,
        ),
        Entry::new(
            "collection_doc_cache_path",
            "The path to collection doc cache",
            Value::from("~/.cache/ansible-navigator/collection_doc_cache.db"),
        )
        .with_short("--cdcp"),
        Entry::new(
            "container_engine",
            "Specify the container engine to run the execution environment",
            Value::from("podman"),
        )
        .with_short("--ce")
        .with_choices(["podman", "docker"]),
        Entry::new(
            "editor_command",
            "Specify the editor command",
            Value::from("vi +{line_number} {filename}"),
        )
        .with_short("--ecmd"),
        Entry::new(
            "editor_console",
            "Specify if the editor is console based",
            true.into(),
        )
        .with_short("--econ"),
        Entry::new(
            "execution_environment",
            "Enable or disable the use of an execution environment",
            true.into(),
        )
        .with_short("--ee"),
        Entry::new(
            "execution_environment_image",
            "Specify the name of the execution environment image",
            Value::from("quay.io/ansible/creator-ee:latest"),
        )
        .with_short("--eei"),
        Entry::new("help_config", "Help options for ansible-config", false.into())
            .with_short("--hc"),
        Entry::new("help_doc", "Help options for ansible-doc", false.into()).with_short("--hd"),
        Entry::new("inventory", "Specify an inventory file path or host list", Value::NotSet)
            .with_short("-i")
            .multiple(),
        Entry::new(
            "inventory_column",
            "Specify a host attribute to show in the inventory view",
            Value::NotSet,
        )
        .with_short("--ic")
        .multiple(),
        Entry::new(
            "log_append",
            "Specify if log messages should be appended to an existing log file",
            true.into(),
        )
        .with_short("--la"),
        Entry::new(
            "log_file",
            "Specify the full path for the log file",
            Value::String(abs_user_path("./ansible-navigator.log")),
        )
        .with_short("--lf"),
        Entry::new("log_level", "Specify the log level", Value::from("warning"))
            .with_short("--ll")
            .with_choices(["debug", "info", "warning", "error", "critical"]),
        Entry::new("mode", "Specify the user-interface mode", Value::from(INTERACTIVE))
            .with_short("-m")
            .with_choices([STDOUT, INTERACTIVE]),
        Entry::new("osc4", "Enable or disable terminal color changing support", true.into())
            .with_short("--osc4"),
        Entry::new(
            "pass_environment_variable",
            "Specify an existing environment variable to be passed through to the execution environment",
            Value::NotSet,
        )
        .with_short("--penv")
        .multiple(),
        Entry::new("playbook", "Specify the playbook name", Value::NotSet),
        Entry::new(
            "playbook_artifact_enable",
            "Enable or disable the creation of artifacts for completed playbooks",
            true.into(),
        )
        .with_short("--pae"),
        Entry::new(
            "playbook_artifact_replay",
            "Specify the path for the playbook artifact to replay",
            Value::NotSet,
        ),
        Entry::new(
            "playbook_artifact_save_as",
            "Specify the name for artifacts created from completed playbooks",
            Value::from("{playbook_dir}/{playbook_name}-artifact-{ts_utc}.json"),
        )
        .with_short("--pas"),
        Entry::new("plugin_name", "Specify the plugin name", Value::NotSet),
        Entry::new("plugin_type", "Specify the plugin type", Value::from("module"))
            .with_short("-t")
            .with_long_override("type")
            .with_choices(PLUGIN_TYPES),
        Entry::new(
            "set_environment_variable",
            "Specify an environment variable and a value to be set within the execution environment",
            Value::NotSet,
        )
        .with_short("--senv")
        .multiple(),
    ]
}

/// Configuration holding every entry at its default.
pub fn navigator_configuration() -> Configuration {
    Configuration {
        application_name: APPLICATION_NAME.to_string(),
        entries: navigator_entries(),
        subcommands: navigator_subcommands(),
        internals: Internals {
            action_packages: vec![BUILTIN_ACTION_PACKAGE.to_string()],
            settings_file_path: None,
        },
    }
}
