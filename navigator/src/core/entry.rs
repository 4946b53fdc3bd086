//! Configuration entries: one named value plus provenance and CLI metadata.

use serde::Serialize;

use crate::core::value::{SourceKind, Value};

/// Current/default value pair and where the current value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryValue {
    pub current: Value,
    pub default: Value,
    pub source: SourceKind,
}

impl EntryValue {
    /// Start from the default; an unset default leaves the source unset too.
    pub fn with_default(default: Value) -> Self {
        let source = if default.is_set() {
            SourceKind::Default
        } else {
            SourceKind::NotSet
        };
        Self {
            current: default.clone(),
            default,
            source,
        }
    }
}

/// Command-line exposure of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliParameters {
    /// Short form as typed by the user, e.g. `-m` or `--ee`.
    pub short: Option<String>,
    /// Long flag name (without dashes) when it differs from the dashed entry name.
    pub long_override: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub short_description: String,
    pub value: EntryValue,
    pub cli_parameters: Option<CliParameters>,
    /// Allowed values, in presentation order. Empty means unrestricted.
    pub choices: Vec<String>,
    pub environment_variable_override: Option<String>,
    /// Value is a list; environment input is split on commas.
    pub multiple: bool,
}

impl Entry {
    pub fn new(name: &str, short_description: &str, default: Value) -> Self {
        Self {
            name: name.to_string(),
            short_description: short_description.to_string(),
            value: EntryValue::with_default(default),
            cli_parameters: None,
            choices: Vec::new(),
            environment_variable_override: None,
            multiple: false,
        }
    }

    pub fn with_short(mut self, short: &str) -> Self {
        let params = self.cli_parameters.get_or_insert_with(CliParameters::default);
        params.short = Some(short.to_string());
        self
    }

    pub fn with_long_override(mut self, long: &str) -> Self {
        let params = self.cli_parameters.get_or_insert_with(CliParameters::default);
        params.long_override = Some(long.to_string());
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn with_env_override(mut self, var: &str) -> Self {
        self.environment_variable_override = Some(var.to_string());
        self
    }

    pub fn name_dashed(&self) -> String {
        self.name.replace('_', "-")
    }

    pub fn short_flag(&self) -> Option<&str> {
        self.cli_parameters
            .as_ref()
            .and_then(|params| params.short.as_deref())
    }

    /// Long flag including the leading dashes.
    pub fn long_flag(&self) -> String {
        let long = self
            .cli_parameters
            .as_ref()
            .and_then(|params| params.long_override.clone())
            .unwrap_or_else(|| self.name_dashed());
        format!("--{long}")
    }

    /// Environment variable read for this entry.
    pub fn environment_variable(&self, prefix: &str) -> String {
        match &self.environment_variable_override {
            Some(var) => var.clone(),
            None => format!("{}_{}", prefix, self.name.to_uppercase()),
        }
    }

    pub fn set(&mut self, current: Value, source: SourceKind) {
        self.value.current = current;
        self.value.source = source;
    }

    pub fn restore_default(&mut self) {
        self.value.current = self.value.default.clone();
        self.value.source = SourceKind::Default;
    }
}
