//! Rules that only look at the entry being processed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::configuration::Configuration;
use crate::core::convert::{abs_user_path, flatten_list, str2bool};
use crate::core::entry::Entry;
use crate::core::messages::Diagnostics;
use crate::core::value::{SourceKind, Value};
use crate::io::log_file::provision_log_file;
use crate::post_process::PostProcessor;

/// Coerce the current value to a boolean, reporting values that do not read as one.
pub(super) fn coerce_bool(entry: &mut Entry) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    match str2bool(&entry.value.current) {
        Ok(value) => entry.value.current = Value::Bool(value),
        Err(_) => diagnostics.exit(format!(
            "{} could not be converted to a boolean value, value was '{}' ({})",
            entry.name,
            entry.value.current,
            entry.value.current.kind()
        )),
    }
    diagnostics
}

/// Replace a non-empty string value with its absolute, `~`-expanded form.
pub(super) fn normalize_path(entry: &mut Entry) {
    if let Value::String(raw) = &entry.value.current
        && !raw.is_empty()
    {
        entry.value.current = Value::String(abs_user_path(raw));
    }
}

impl PostProcessor<'_> {
    pub(super) fn true_or_false(&self, entry: &mut Entry, _config: &Configuration) -> Diagnostics {
        coerce_bool(entry)
    }

    pub(super) fn collection_doc_cache_path(
        &self,
        entry: &mut Entry,
        _config: &Configuration,
    ) -> Diagnostics {
        normalize_path(entry);
        Diagnostics::new()
    }

    /// Environment input arrives as one string; split it into arguments.
    pub(super) fn cmdline(&self, entry: &mut Entry, _config: &Configuration) -> Diagnostics {
        if entry.value.source == SourceKind::EnvironmentVariable
            && let Value::String(raw) = &entry.value.current
        {
            entry.value.current = Value::strings(raw.split_whitespace());
        }
        Diagnostics::new()
    }

    /// Flatten nested lists into one list of strings.
    pub(super) fn flatten(&self, entry: &mut Entry, _config: &Configuration) -> Diagnostics {
        if entry.value.current.is_set() {
            entry.value.current = Value::strings(flatten_list(&entry.value.current));
        }
        Diagnostics::new()
    }

    pub(super) fn log_file(&self, entry: &mut Entry, _config: &Configuration) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        normalize_path(entry);
        let Some(path) = entry.value.current.as_str().map(PathBuf::from) else {
            return diagnostics;
        };
        if let Err(err) = provision_log_file(&path) {
            diagnostics.exit(format!(
                "Failed to create log file {} specified in '{}'",
                path.display(),
                entry.value.source
            ));
            diagnostics.exit(format!("The error was: {err:#}"));
            entry.restore_default();
            diagnostics.exit(format!(
                "Log file set to default location: {}.",
                entry.value.current
            ));
            if let Some(short) = entry.short_flag() {
                diagnostics.hint(format!(
                    "Try again with '{short} ~/ansible-navigator.log' to place it in your home directory"
                ));
            }
        }
        diagnostics
    }

    /// Parse `NAME=value` pairs from the environment or command line into a mapping.
    pub(super) fn set_environment_variable(
        &self,
        entry: &mut Entry,
        _config: &Configuration,
    ) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        match entry.value.source {
            SourceKind::EnvironmentVariable | SourceKind::UserCli => {
                let mut parsed = BTreeMap::new();
                for pair in flatten_list(&entry.value.current) {
                    match pair.split_once('=') {
                        Some((name, value)) if !value.contains('=') => {
                            parsed.insert(name.to_string(), value.to_string());
                        }
                        _ => {
                            diagnostics.exit(format!(
                                "The following set-environment-variable entry could not be parsed: {pair}"
                            ));
                            if let Some(short) = entry.short_flag() {
                                diagnostics
                                    .hint(format!("Try again with '{short} MYVAR=myvalue'"));
                            }
                        }
                    }
                }
                entry.value.current = Value::Mapping(parsed);
            }
            _ => match &entry.value.current {
                Value::NotSet | Value::Mapping(_) => {}
                other => diagnostics.exit(format!(
                    "{} must be a mapping of variable names to values, found {} in '{}'",
                    entry.name,
                    other.kind(),
                    entry.value.source
                )),
            },
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionRegistry;
    use crate::core::definitions::navigator_configuration;
    use crate::test_support::FakeHost;
    use std::fs;
    use std::path::Path;

    fn entry_with(name: &str, value: Value, source: SourceKind) -> Entry {
        let config = navigator_configuration();
        let mut entry = config.entry(name).expect("known entry").clone();
        entry.set(value, source);
        entry
    }

    fn apply<F>(entry: &mut Entry, rule: F) -> Diagnostics
    where
        F: FnOnce(&PostProcessor<'_>, &mut Entry, &Configuration) -> Diagnostics,
    {
        let host = FakeHost::new();
        let actions = ActionRegistry::new();
        let processor = PostProcessor::new(&host, &actions);
        let config = navigator_configuration();
        rule(&processor, entry, &config)
    }

    #[test]
    fn booleans_accept_common_spellings() {
        for (raw, expected) in [("yes", true), ("True", true), ("1", true), ("NO", false), ("0", false)] {
            let mut entry = entry_with("osc4", Value::from(raw), SourceKind::UserCli);
            let diagnostics = apply(&mut entry, |p, e, c| p.true_or_false(e, c));
            assert!(!diagnostics.is_fatal(), "{raw}");
            assert_eq!(entry.value.current, Value::Bool(expected), "{raw}");
        }
    }

    #[test]
    fn boolean_failure_names_the_entry_and_value() {
        let mut entry = entry_with("log_append", Value::from("maybe"), SourceKind::ConfigFile);
        let diagnostics = apply(&mut entry, |p, e, c| p.true_or_false(e, c));
        assert_eq!(diagnostics.exit_messages.len(), 1);
        assert_eq!(
            diagnostics.exit_messages[0].message,
            "log_append could not be converted to a boolean value, value was 'maybe' (string)"
        );
        assert_eq!(entry.value.current, Value::from("maybe"));
    }

    #[test]
    fn cmdline_from_environment_is_split() {
        let mut entry = entry_with(
            "cmdline",
            Value::from("--forks 15  --check"),
            SourceKind::EnvironmentVariable,
        );
        apply(&mut entry, |p, e, c| p.cmdline(e, c));
        assert_eq!(entry.value.current, Value::strings(["--forks", "15", "--check"]));
    }

    #[test]
    fn cmdline_from_command_line_is_untouched() {
        let original = Value::strings(["--forks 15"]);
        let mut entry = entry_with("cmdline", original.clone(), SourceKind::UserCli);
        apply(&mut entry, |p, e, c| p.cmdline(e, c));
        assert_eq!(entry.value.current, original);
    }

    #[test]
    fn flatten_merges_nested_lists() {
        let mut entry = entry_with(
            "inventory_column",
            Value::List(vec![
                Value::from("ansible_host"),
                Value::strings(["ansible_port", "ansible_user"]),
            ]),
            SourceKind::UserCli,
        );
        apply(&mut entry, |p, e, c| p.flatten(e, c));
        assert_eq!(
            entry.value.current,
            Value::strings(["ansible_host", "ansible_port", "ansible_user"])
        );
    }

    #[test]
    fn flatten_leaves_unset_alone() {
        let mut entry = entry_with("pass_environment_variable", Value::NotSet, SourceKind::NotSet);
        apply(&mut entry, |p, e, c| p.flatten(e, c));
        assert_eq!(entry.value.current, Value::NotSet);
    }

    #[test]
    fn collection_doc_cache_path_is_absolute() {
        let mut entry = entry_with(
            "collection_doc_cache_path",
            Value::from("cache/doc.db"),
            SourceKind::UserCli,
        );
        apply(&mut entry, |p, e, c| p.collection_doc_cache_path(e, c));
        let current = entry.value.current.as_str().expect("string");
        assert!(Path::new(current).is_absolute());
        assert!(current.ends_with("cache/doc.db"));
    }

    #[test]
    fn log_file_is_created() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("logs").join("navigator.log");
        let mut entry = entry_with(
            "log_file",
            Value::String(path.to_string_lossy().into_owned()),
            SourceKind::UserCli,
        );
        let diagnostics = apply(&mut entry, |p, e, c| p.log_file(e, c));
        assert!(!diagnostics.is_fatal());
        assert!(path.is_file());
    }

    #[test]
    fn unusable_log_file_reverts_to_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").expect("write");
        let path = blocker.join("navigator.log");
        let mut entry = entry_with(
            "log_file",
            Value::String(path.to_string_lossy().into_owned()),
            SourceKind::UserCli,
        );

        let diagnostics = apply(&mut entry, |p, e, c| p.log_file(e, c));
        let errors: Vec<&str> = diagnostics.errors().map(|m| m.message.as_str()).collect();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors[0],
            format!(
                "Failed to create log file {} specified in 'command line'",
                path.display()
            )
        );
        assert!(errors[1].starts_with("The error was: "));
        assert_eq!(entry.value.current, entry.value.default);
        assert_eq!(entry.value.source, SourceKind::Default);
        assert_eq!(
            errors[2],
            format!("Log file set to default location: {}.", entry.value.default)
        );
        let hints: Vec<&str> = diagnostics.hints().map(|m| m.message.as_str()).collect();
        assert_eq!(
            hints,
            vec!["Try again with '--lf ~/ansible-navigator.log' to place it in your home directory"]
        );
    }

    #[test]
    fn environment_pairs_become_a_mapping() {
        let mut entry = entry_with(
            "set_environment_variable",
            Value::strings(["A=1", "B=two words"]),
            SourceKind::UserCli,
        );
        let diagnostics = apply(&mut entry, |p, e, c| p.set_environment_variable(e, c));
        assert!(!diagnostics.is_fatal());
        assert_eq!(
            entry.value.current,
            Value::Mapping(BTreeMap::from([
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "two words".to_string()),
            ]))
        );
    }

    #[test]
    fn repeated_names_keep_the_last_value() {
        let mut entry = entry_with(
            "set_environment_variable",
            Value::strings(["A=1", "A=2"]),
            SourceKind::UserCli,
        );
        let diagnostics = apply(&mut entry, |p, e, c| p.set_environment_variable(e, c));
        assert!(diagnostics.exit_messages.is_empty());
        assert_eq!(
            entry.value.current,
            Value::Mapping(BTreeMap::from([("A".to_string(), "2".to_string())]))
        );
    }

    #[test]
    fn malformed_pairs_are_reported_individually() {
        let mut entry = entry_with(
            "set_environment_variable",
            Value::strings(["GOOD=1", "NOEQUALS", "A=B=C"]),
            SourceKind::EnvironmentVariable,
        );
        let diagnostics = apply(&mut entry, |p, e, c| p.set_environment_variable(e, c));
        let errors: Vec<&str> = diagnostics.errors().map(|m| m.message.as_str()).collect();
        assert_eq!(
            errors,
            vec![
                "The following set-environment-variable entry could not be parsed: NOEQUALS",
                "The following set-environment-variable entry could not be parsed: A=B=C",
            ]
        );
        assert_eq!(diagnostics.hints().count(), 2);
        assert_eq!(
            entry.value.current,
            Value::Mapping(BTreeMap::from([("GOOD".to_string(), "1".to_string())]))
        );
    }

    #[test]
    fn settings_file_mapping_is_kept() {
        let mapping = Value::Mapping(BTreeMap::from([("X".to_string(), "3".to_string())]));
        let mut entry = entry_with("set_environment_variable", mapping.clone(), SourceKind::ConfigFile);
        let diagnostics = apply(&mut entry, |p, e, c| p.set_environment_variable(e, c));
        assert!(!diagnostics.is_fatal());
        assert_eq!(entry.value.current, mapping);
    }

    #[test]
    fn unset_environment_variables_are_left_alone() {
        let mut entry = entry_with("set_environment_variable", Value::NotSet, SourceKind::NotSet);
        let diagnostics = apply(&mut entry, |p, e, c| p.set_environment_variable(e, c));
        assert_eq!(diagnostics, Diagnostics::new());
        assert_eq!(entry.value.current, Value::NotSet);
    }
}
