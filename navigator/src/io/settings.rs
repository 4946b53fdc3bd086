//! Settings file discovery and loading (`ansible-navigator.toml`).
//!
//! The file holds one `[ansible-navigator]` table keyed by entry name:
//!
//! ```toml
//! [ansible-navigator]
//! mode = "stdout"
//! execution_environment = false
//! inventory = ["inventory/hosts.yml"]
//! set_environment_variable = { ANSIBLE_FORCE_COLOR = "true" }
//! ```
//!
//! Documents are validated against the embedded JSON Schema before any value
//! is applied.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::validator_for;
use tracing::debug;

use crate::core::value::Value;

pub const SETTINGS_FILE_NAME: &str = "ansible-navigator.toml";
pub const SETTINGS_ENV_VAR: &str = "ANSIBLE_NAVIGATOR_CONFIG";
const ROOT_KEY: &str = "ansible-navigator";
const SETTINGS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/settings.schema.json"
));

/// Values read from a settings file, in document order of entry names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub path: PathBuf,
    pub values: Vec<(String, Value)>,
}

/// Pick the settings file to use, if any.
///
/// Order: explicit path, `ANSIBLE_NAVIGATOR_CONFIG`, `./ansible-navigator.toml`,
/// `~/.ansible-navigator.toml`. Explicitly requested files must exist.
pub fn locate_settings_file(
    explicit: Option<&Path>,
    env_value: Option<&str>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("settings file {} does not exist", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    if let Some(raw) = env_value.filter(|raw| !raw.is_empty()) {
        let path = PathBuf::from(raw);
        if !path.is_file() {
            bail!(
                "settings file {} set by {SETTINGS_ENV_VAR} does not exist",
                path.display()
            );
        }
        return Ok(Some(path));
    }
    let candidates = [
        Some(cwd.join(SETTINGS_FILE_NAME)),
        home.map(|home| home.join(format!(".{SETTINGS_FILE_NAME}"))),
    ];
    Ok(candidates.into_iter().flatten().find(|path| path.is_file()))
}

/// Read, schema-check, and convert a settings file.
pub fn load_settings(path: &Path) -> Result<SettingsFile> {
    debug!(path = %path.display(), "loading settings file");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read settings {}", path.display()))?;
    let table: toml::Table =
        toml::from_str(&contents).with_context(|| format!("parse settings {}", path.display()))?;
    let document = serde_json::to_value(&table)
        .with_context(|| format!("convert settings {}", path.display()))?;
    validate_schema(&document).with_context(|| format!("validate settings {}", path.display()))?;

    let values = document
        .get(ROOT_KEY)
        .and_then(serde_json::Value::as_object)
        .map(|root| {
            root.iter()
                .map(|(name, value)| (name.clone(), Value::from_json(value)))
                .collect()
        })
        .unwrap_or_default();
    Ok(SettingsFile {
        path: path.to_path_buf(),
        values,
    })
}

fn validate_schema(document: &serde_json::Value) -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(SETTINGS_SCHEMA).context("parse settings schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(document)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed: {}", messages.join("; "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn load_converts_values() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE_NAME);
        fs::write(
            &path,
            r#"
[ansible-navigator]
mode = "stdout"
execution_environment = false
inventory = ["one.yml", ["two.yml"]]
set_environment_variable = { RETRIES = 3, COLOR = "true" }
"#,
        )
        .expect("write");

        let settings = load_settings(&path).expect("load");
        let values: BTreeMap<String, Value> = settings.values.into_iter().collect();
        assert_eq!(values["mode"], Value::from("stdout"));
        assert_eq!(values["execution_environment"], Value::Bool(false));
        assert_eq!(
            values["inventory"],
            Value::List(vec![Value::from("one.yml"), Value::strings(["two.yml"])])
        );
        assert_eq!(
            values["set_environment_variable"],
            Value::Mapping(BTreeMap::from([
                ("COLOR".to_string(), "true".to_string()),
                ("RETRIES".to_string(), "3".to_string()),
            ]))
        );
    }

    #[test]
    fn schema_rejects_unknown_keys() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "[ansible-navigator]\nnot_an_entry = 1\n").expect("write");
        let err = load_settings(&path).expect_err("should fail");
        assert!(format!("{err:#}").contains("schema validation failed"));
    }

    #[test]
    fn schema_rejects_wrong_types() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "[ansible-navigator]\nplaybook = 42\n").expect("write");
        assert!(load_settings(&path).is_err());
    }

    #[test]
    fn locate_prefers_explicit_then_env_then_cwd_then_home() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cwd = temp.path().join("project");
        let home = temp.path().join("home");
        fs::create_dir_all(&cwd).expect("cwd");
        fs::create_dir_all(&home).expect("home");

        assert_eq!(
            locate_settings_file(None, None, &cwd, Some(&home)).expect("locate"),
            None
        );

        let home_file = home.join(".ansible-navigator.toml");
        fs::write(&home_file, "").expect("write");
        assert_eq!(
            locate_settings_file(None, None, &cwd, Some(&home)).expect("locate"),
            Some(home_file)
        );

        let cwd_file = cwd.join(SETTINGS_FILE_NAME);
        fs::write(&cwd_file, "").expect("write");
        assert_eq!(
            locate_settings_file(None, None, &cwd, Some(&home)).expect("locate"),
            Some(cwd_file)
        );

        let env_file = temp.path().join("env.toml");
        fs::write(&env_file, "").expect("write");
        let env_raw = env_file.to_string_lossy().into_owned();
        assert_eq!(
            locate_settings_file(None, Some(&env_raw), &cwd, Some(&home)).expect("locate"),
            Some(env_file.clone())
        );

        let explicit = temp.path().join("explicit.toml");
        fs::write(&explicit, "").expect("write");
        assert_eq!(
            locate_settings_file(Some(&explicit), Some(&env_raw), &cwd, Some(&home))
                .expect("locate"),
            Some(explicit)
        );
    }

    #[test]
    fn locate_errors_on_missing_explicit_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("missing.toml");
        let err = locate_settings_file(Some(&missing), None, temp.path(), None)
            .expect_err("should fail");
        assert!(err.to_string().contains("does not exist"));
    }
}
